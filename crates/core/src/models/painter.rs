use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Painter profile as seen through the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painter {
    pub user_id: UserId,
    /// Name of the owning user account, when the directory could join it.
    pub name: Option<String>,
    /// 0 to 5.
    pub rating: f64,
    pub specialization: String,
}

impl Painter {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => fallback_painter_name(self.user_id),
        }
    }
}

/// Directory listing filter. Matching on specialization is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainterFilter {
    #[serde(default)]
    pub specialization: Option<String>,
}

impl PainterFilter {
    pub fn matches(&self, painter: &Painter) -> bool {
        self.specialization
            .as_deref()
            .is_none_or(|wanted| painter.specialization == wanted)
    }
}

pub fn fallback_painter_name(user_id: UserId) -> String {
    format!("Painter {}", user_id)
}
