use serde::{Deserialize, Serialize};

/// Render-only styling. Themes never influence layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub node_fill: String,
    pub node_border: String,
    pub text_color: String,
    pub line_color: String,
    pub capsule_fill: String,
    pub header_fill: String,
    pub header_text_color: String,
    pub frame_border: String,
    pub wedge_fill: String,
    pub stripe_fill: String,
    pub error_fill: String,
    pub error_border: String,
    pub error_text_color: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "JetBrains Mono, Menlo, Consolas, monospace".to_string(),
            background: "#FFFFFF".to_string(),
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            capsule_fill: "#EEF2F8".to_string(),
            header_fill: "#E3EAF6".to_string(),
            header_text_color: "#1C2430".to_string(),
            frame_border: "#AAB8D0".to_string(),
            wedge_fill: "#F2F6FD".to_string(),
            stripe_fill: "#EEF2F8".to_string(),
            error_fill: "#FDECEC".to_string(),
            error_border: "#D46A6A".to_string(),
            error_text_color: "#8A2E2E".to_string(),
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "Courier New, monospace".to_string(),
            background: "#FFFFFF".to_string(),
            node_fill: "#FFFFFF".to_string(),
            node_border: "#333333".to_string(),
            text_color: "#111111".to_string(),
            line_color: "#333333".to_string(),
            capsule_fill: "#FFFFFF".to_string(),
            header_fill: "#EEEEEE".to_string(),
            header_text_color: "#111111".to_string(),
            frame_border: "#333333".to_string(),
            wedge_fill: "#FFFFFF".to_string(),
            stripe_fill: "#FFFFFF".to_string(),
            error_fill: "#FFF2F2".to_string(),
            error_border: "#CC3333".to_string(),
            error_text_color: "#992222".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
