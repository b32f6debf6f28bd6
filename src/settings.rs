use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "RenderSettings::default_shadow_map_size")]
    pub shadow_map_size: u32,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub present_mode: PresentModeSetting,
    #[serde(default = "RenderSettings::default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "RenderSettings::default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_map_size: Self::default_shadow_map_size(),
            resolution: Resolution::default(),
            present_mode: PresentModeSetting::default(),
            move_speed: Self::default_move_speed(),
            mouse_sensitivity: Self::default_mouse_sensitivity(),
        }
    }
}

impl RenderSettings {
    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RenderSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded render settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default render settings.",
                        path, err
                    );
                    RenderSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Render settings file {:?} not found. Using default settings.",
                    path
                );
                RenderSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default render settings.",
                    path, err
                );
                RenderSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.shadow_map_size == 0 {
            warn!("Shadow map size must be greater than zero. Using default value.");
            self.shadow_map_size = Self::default_shadow_map_size();
        }

        if self.resolution.width == 0 || self.resolution.height == 0 {
            warn!("Resolution must be greater than zero. Using default resolution.");
            self.resolution = Resolution::default();
        }

        if self.move_speed <= 0.0 {
            warn!("Move speed must be positive. Using default value.");
            self.move_speed = Self::default_move_speed();
        }

        if self.mouse_sensitivity <= 0.0 {
            warn!("Mouse sensitivity must be positive. Using default value.");
            self.mouse_sensitivity = Self::default_mouse_sensitivity();
        }

        self
    }

    pub fn present_mode(&self, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
        let desired = self.present_mode.to_wgpu();
        if available.contains(&desired) {
            return desired;
        }

        warn!(
            "Requested present mode {:?} is not supported. Falling back to FIFO.",
            desired
        );

        if available.contains(&wgpu::PresentMode::Fifo) {
            wgpu::PresentMode::Fifo
        } else {
            available
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo)
        }
    }

    const fn default_shadow_map_size() -> u32 {
        2048
    }

    const fn default_move_speed() -> f32 {
        0.2
    }

    const fn default_mouse_sensitivity() -> f32 {
        0.01
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentModeSetting {
    #[default]
    Fifo,
    FifoRelaxed,
    Immediate,
    Mailbox,
}

impl PresentModeSetting {
    fn to_wgpu(&self) -> wgpu::PresentMode {
        match self {
            PresentModeSetting::Fifo => wgpu::PresentMode::Fifo,
            PresentModeSetting::FifoRelaxed => wgpu::PresentMode::FifoRelaxed,
            PresentModeSetting::Immediate => wgpu::PresentMode::Immediate,
            PresentModeSetting::Mailbox => wgpu::PresentMode::Mailbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = RenderSettings::load_from_path("does-not-exist.json");
        assert_eq!(settings.shadow_map_size, 2048);
        assert_eq!(settings.resolution.width, 1280);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("shadowbox-settings-malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let settings = RenderSettings::load_from_path(&path);
        assert_eq!(settings.shadow_map_size, 2048);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn zero_fields_are_replaced_by_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("shadowbox-settings-zero.json");
        std::fs::write(
            &path,
            r#"{ "shadow_map_size": 0, "resolution": { "width": 0, "height": 0 }, "move_speed": -1.0 }"#,
        )
        .unwrap();
        let settings = RenderSettings::load_from_path(&path);
        assert_eq!(settings.shadow_map_size, 2048);
        assert_eq!(settings.resolution.height, 720);
        assert_eq!(settings.move_speed, 0.2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn partial_settings_keep_specified_values() {
        let dir = std::env::temp_dir();
        let path = dir.join("shadowbox-settings-partial.json");
        std::fs::write(&path, r#"{ "shadow_map_size": 1024 }"#).unwrap();
        let settings = RenderSettings::load_from_path(&path);
        assert_eq!(settings.shadow_map_size, 1024);
        assert_eq!(settings.resolution.width, 1280);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let settings = RenderSettings {
            present_mode: PresentModeSetting::Mailbox,
            ..Default::default()
        };
        let available = [wgpu::PresentMode::Fifo];
        assert_eq!(settings.present_mode(&available), wgpu::PresentMode::Fifo);
    }
}
