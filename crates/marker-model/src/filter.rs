//! Marker selection before export.

use serde::{Deserialize, Serialize};

use crate::marker::{Marker, MarkerKind};

/// Marker kind without per-marker state, used for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKindFilter {
    Standard,
    Chapter,
    ToDo,
    Caption,
}

impl MarkerKindFilter {
    pub fn matches(self, kind: &MarkerKind) -> bool {
        matches!(
            (self, kind),
            (MarkerKindFilter::Standard, MarkerKind::Standard)
                | (MarkerKindFilter::Chapter, MarkerKind::Chapter)
                | (MarkerKindFilter::ToDo, MarkerKind::ToDo { .. })
                | (MarkerKindFilter::Caption, MarkerKind::Caption)
        )
    }
}

impl std::str::FromStr for MarkerKindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(MarkerKindFilter::Standard),
            "chapter" => Ok(MarkerKindFilter::Chapter),
            "to-do" | "todo" => Ok(MarkerKindFilter::ToDo),
            "caption" => Ok(MarkerKindFilter::Caption),
            other => Err(format!(
                "unknown marker kind: {other}. Use: standard, chapter, to-do, caption"
            )),
        }
    }
}

/// Which markers take part in an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerFilter {
    /// Kinds to keep. Empty keeps every kind.
    pub kinds: Vec<MarkerKindFilter>,

    /// Role names (case-insensitive). A marker is dropped when any of its
    /// roles matches.
    pub exclude_roles: Vec<String>,

    /// Drop markers whose name is empty or whitespace.
    pub exclude_unnamed: bool,
}

impl MarkerFilter {
    pub fn accepts(&self, marker: &Marker) -> bool {
        if !self.kinds.is_empty() && !self.kinds.iter().any(|k| k.matches(&marker.kind)) {
            return false;
        }
        if self.exclude_unnamed && marker.name.trim().is_empty() {
            return false;
        }
        !marker.roles.iter().any(|role| {
            self.exclude_roles
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(role.name()))
        })
    }

    /// Markers accepted by this filter, in input order.
    pub fn apply(&self, markers: &[Marker]) -> Vec<Marker> {
        let kept: Vec<Marker> = markers
            .iter()
            .filter(|m| self.accepts(m))
            .cloned()
            .collect();
        if kept.len() != markers.len() {
            tracing::debug!(
                kept = kept.len(),
                dropped = markers.len() - kept.len(),
                "Filtered markers"
            );
        }
        kept
    }
}
