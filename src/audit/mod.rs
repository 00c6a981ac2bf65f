//! Audit: verify that per-resort asset flags match the files on disk

use crate::resorts::ResortCollection;
use serde_json::Value;
use std::path::Path;

/// Every mismatch between `properties.assets.pistes` and the presence
/// of `<pistes-dir>/<slug>.geojson`
#[derive(Debug, Default)]
pub struct AuditReport {
    pub issues: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn audit_assets(resorts: &ResortCollection, pistes_dir: &Path) -> AuditReport {
    let mut report = AuditReport::default();

    for feature in &resorts.features {
        let slug = feature.slug().unwrap_or("unknown");

        let Some(assets) = feature.properties.get("assets").and_then(Value::as_object) else {
            report.issues.push(format!("{slug}: missing assets object"));
            continue;
        };

        let flagged = assets
            .get("pistes")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let file = pistes_dir.join(format!("{slug}.geojson"));
        let exists = file.is_file();

        if flagged && !exists {
            report
                .issues
                .push(format!("{slug}: pistes=true but no file at {}", file.display()));
        }
        if !flagged && exists {
            report.issues.push(format!(
                "{slug}: pistes=false but file exists at {}",
                file.display()
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn resorts(raw: &str) -> ResortCollection {
        serde_json::from_str(raw).unwrap()
    }

    fn feature(slug: &str, flagged: Option<bool>) -> String {
        let assets = match flagged {
            Some(flag) => format!(r#", "assets": {{"pistes": {flag}}}"#),
            None => String::new(),
        };
        format!(
            r#"{{"type": "Feature", "geometry": {{"type": "Point", "coordinates": [0, 0]}},
                 "properties": {{"slug": "{slug}"{assets}}}}}"#
        )
    }

    fn collection(features: &[String]) -> ResortCollection {
        resorts(&format!(
            r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
            features.join(",")
        ))
    }

    #[test]
    fn test_clean_audit() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("vail.geojson")).unwrap();

        let resorts = collection(&[
            feature("vail", Some(true)),
            feature("mythical", Some(false)),
        ]);
        let report = audit_assets(&resorts, dir.path());
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn test_flag_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let resorts = collection(&[feature("vail", Some(true))]);

        let report = audit_assets(&resorts, dir.path());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].starts_with("vail: pistes=true but no file"));
    }

    #[test]
    fn test_file_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("vail.geojson")).unwrap();
        let resorts = collection(&[feature("vail", Some(false))]);

        let report = audit_assets(&resorts, dir.path());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("pistes=false but file exists"));
    }

    #[test]
    fn test_missing_assets_object() {
        let dir = tempfile::tempdir().unwrap();
        let resorts = collection(&[feature("vail", None)]);

        let report = audit_assets(&resorts, dir.path());
        assert_eq!(report.issues, vec!["vail: missing assets object"]);
    }
}
