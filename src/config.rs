use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Floor for every boxed node.
    pub min_width: f32,
    pub min_height: f32,
    /// Vertical gap between stacked sequence children.
    pub margin_y: f32,
    /// Horizontal gap between a loop's condition stripe and its body.
    pub gap_x: f32,
    pub header_height: f32,
    pub container_padding: f32,
    pub capsule_height: f32,
    /// Minimum width of the start capsule; the end capsule is fixed at this width.
    pub capsule_min_width: f32,
    pub capsule_text_padding: f32,
    /// Horizontal text padding inside command boxes, applied per side.
    pub text_padding: f32,
    pub cond_label_min_width: f32,
    pub cond_label_padding: f32,
    /// Minimum vertical gap between a then branch and an else branch.
    pub branch_gap: f32,
    pub min_wedge_height: f32,
    /// Space reserved to the right of a conditional's widest branch.
    pub trailing_padding: f32,
    pub bottom_padding: f32,
    pub notch_depth: f32,
    /// Gap between the wedge's right edge and the branch boxes.
    pub wedge_child_gap: f32,
    /// Inset of the doubled line on a loop stripe's left edge.
    pub loop_stripe_inset: f32,
    pub header_text_inset: f32,
    pub font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            min_height: 40.0,
            margin_y: 20.0,
            gap_x: 20.0,
            header_height: 30.0,
            container_padding: 20.0,
            capsule_height: 30.0,
            capsule_min_width: 60.0,
            capsule_text_padding: 8.0,
            text_padding: 10.0,
            cond_label_min_width: 40.0,
            cond_label_padding: 10.0,
            branch_gap: 40.0,
            min_wedge_height: 60.0,
            trailing_padding: 50.0,
            bottom_padding: 20.0,
            notch_depth: 10.0,
            wedge_child_gap: 10.0,
            loop_stripe_inset: 6.0,
            header_text_inset: 10.0,
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    layout: Option<LayoutOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    min_width: Option<f32>,
    min_height: Option<f32>,
    margin_y: Option<f32>,
    gap_x: Option<f32>,
    header_height: Option<f32>,
    container_padding: Option<f32>,
    branch_gap: Option<f32>,
    min_wedge_height: Option<f32>,
    trailing_padding: Option<f32>,
    bottom_padding: Option<f32>,
    notch_depth: Option<f32>,
    wedge_child_gap: Option<f32>,
}

/// Loads a config file (JSON, with JSON5 fallback for commented files) on top
/// of the defaults. A missing path yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "classic" {
            config.theme = Theme::classic();
        } else if theme_name == "modern" || theme_name == "default" {
            config.theme = Theme::modern();
        }
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.font_size {
        config.layout.font_size = v;
    }

    if let Some(overrides) = parsed.layout {
        let layout = &mut config.layout;
        if let Some(v) = overrides.min_width {
            layout.min_width = v;
        }
        if let Some(v) = overrides.min_height {
            layout.min_height = v;
        }
        if let Some(v) = overrides.margin_y {
            layout.margin_y = v;
        }
        if let Some(v) = overrides.gap_x {
            layout.gap_x = v;
        }
        if let Some(v) = overrides.header_height {
            layout.header_height = v;
        }
        if let Some(v) = overrides.container_padding {
            layout.container_padding = v;
        }
        if let Some(v) = overrides.branch_gap {
            layout.branch_gap = v;
        }
        if let Some(v) = overrides.min_wedge_height {
            layout.min_wedge_height = v;
        }
        if let Some(v) = overrides.trailing_padding {
            layout.trailing_padding = v;
        }
        if let Some(v) = overrides.bottom_padding {
            layout.bottom_padding = v;
        }
        if let Some(v) = overrides.notch_depth {
            layout.notch_depth = v;
        }
        if let Some(v) = overrides.wedge_child_gap {
            layout.wedge_child_gap = v;
        }
    }

    Ok(config)
}
