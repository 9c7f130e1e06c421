//! Per-profile field catalogs.
//!
//! Every profile declares its own closed field enum with [`export_fields!`].
//! Declaration order is column order; rows are [`IndexMap`]s so that order
//! survives all the way into the written manifest.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

/// A column of a profile's manifest.
pub trait ExportField: Copy + Eq + Hash + Debug + 'static {
    /// Header string written to manifests.
    fn name(&self) -> &'static str;

    /// Stable programmatic key.
    fn key(&self) -> &'static str;

    /// Whether the column references generated images.
    fn is_media(&self) -> bool;

    /// Every field, in declaration order.
    fn all() -> &'static [Self];

    /// Fields written for a run, dropping image columns under `no_media`.
    fn columns(no_media: bool) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|f| !(no_media && f.is_media()))
            .collect()
    }
}

/// A cell value in a nested (JSON) manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportFieldValue {
    String(String),
    Array(Vec<String>),
}

impl ExportFieldValue {
    /// Flattened form for tabular manifests.
    pub fn to_table_string(&self) -> String {
        match self {
            ExportFieldValue::String(s) => s.clone(),
            ExportFieldValue::Array(items) => items.join(", "),
        }
    }
}

impl From<String> for ExportFieldValue {
    fn from(value: String) -> Self {
        ExportFieldValue::String(value)
    }
}

impl From<&str> for ExportFieldValue {
    fn from(value: &str) -> Self {
        ExportFieldValue::String(value.to_string())
    }
}

/// One row of a tabular manifest.
pub type TableRow<F> = IndexMap<F, String>;

/// One entry of a nested manifest.
pub type NestedRow<F> = IndexMap<F, ExportFieldValue>;

/// Declare a profile field enum.
///
/// ```ignore
/// export_fields! {
///     pub enum ChapterField {
///         Position = ("position", "Timestamp"),
///         Image = ("image", "Image Filename", media),
///     }
/// }
/// ```
macro_rules! export_fields {
    (@media media) => {
        true
    };
    (@media) => {
        false
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = ($key:literal, $display:literal $(, $media:ident)?)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::fields::ExportField for $name {
            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }

            fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            fn is_media(&self) -> bool {
                match self {
                    $($name::$variant => export_fields!(@media $($media)?),)+
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant,)+]
            }
        }
    };
}

pub(crate) use export_fields;

#[cfg(test)]
mod tests {
    use super::*;

    export_fields! {
        enum SampleField {
            Position = ("position", "Marker Position"),
            Name = ("name", "Marker Name"),
            Image = ("image_filename", "Image Filename", media),
        }
    }

    #[test]
    fn test_declaration_order_is_column_order() {
        let names: Vec<&str> = SampleField::all().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Marker Position", "Marker Name", "Image Filename"]);
        assert_eq!(SampleField::Name.key(), "name");
    }

    #[test]
    fn test_no_media_drops_image_columns() {
        assert_eq!(SampleField::columns(false).len(), 3);
        assert_eq!(
            SampleField::columns(true),
            vec![SampleField::Position, SampleField::Name]
        );
    }

    #[test]
    fn test_array_values_flatten_for_tables() {
        let value = ExportFieldValue::Array(vec!["Dialogue".into(), "Music".into()]);
        assert_eq!(value.to_table_string(), "Dialogue, Music");
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"["Dialogue","Music"]"#
        );
        assert_eq!(serde_json::to_string(&ExportFieldValue::from("x")).unwrap(), r#""x""#);
    }
}
