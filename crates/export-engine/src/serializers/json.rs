//! Nested JSON manifests.

use indexmap::IndexMap;

use markex_common::error::{MarkexError, MarkexResult};

use crate::fields::{ExportField, ExportFieldValue, NestedRow};

/// Pretty-printed array of objects keyed by field display name.
pub fn json_manifest<F: ExportField>(rows: &[NestedRow<F>]) -> MarkexResult<Vec<u8>> {
    let objects: Vec<IndexMap<&'static str, &ExportFieldValue>> = rows
        .iter()
        .map(|row| row.iter().map(|(field, value)| (field.name(), value)).collect())
        .collect();

    serde_json::to_vec_pretty(&objects).map_err(|e| MarkexError::encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::export_fields;

    export_fields! {
        enum Col {
            Name = ("name", "Marker Name"),
            Roles = ("video_role", "Video Role"),
        }
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        let mut row = NestedRow::new();
        row.insert(Col::Name, ExportFieldValue::from("Take 2"));
        row.insert(
            Col::Roles,
            ExportFieldValue::Array(vec!["Video".into(), "Titles".into()]),
        );

        let out = String::from_utf8(json_manifest(&[row]).unwrap()).unwrap();
        let name_at = out.find("Marker Name").unwrap();
        let roles_at = out.find("Video Role").unwrap();
        assert!(name_at < roles_at);

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["Video Role"][1], "Titles");
    }

    #[test]
    fn test_empty_manifest_is_empty_array() {
        let out = json_manifest::<Col>(&[]).unwrap();
        assert_eq!(out, b"[]");
    }
}
