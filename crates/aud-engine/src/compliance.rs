//! Compliance aggregation: overdue actions, department rollups, severity
//! breakdown, and document classification.
//!
//! Everything here is a pure function of its inputs and the injected `now`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use aud_core::entities::Action;
use aud_core::enums::{DocumentKind, Severity};
use aud_core::responses::{DeptCount, OverdueAction, SeverityCount};

use crate::collaborators::{DepartmentResolver, resolve_or_raw};
use crate::hierarchy::AuditHierarchy;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Content types that say nothing about the payload.
const OPAQUE_CONTENT_TYPES: [&str; 2] = ["application/octet-stream", "binary/octet-stream"];

// ---------------------------------------------------------------------------
// Document classification
// ---------------------------------------------------------------------------

/// Classify an attachment from its declared content type and file name.
///
/// An `image/*` content type wins. When the content type is absent, blank,
/// or opaque, the file-name extension decides. Any other input is a file.
#[must_use]
pub fn classify_document(content_type: Option<&str>, file_name: Option<&str>) -> DocumentKind {
    let essence = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .filter(|ct| !ct.is_empty());

    let by_extension = || {
        file_name
            .and_then(extension)
            .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
    };

    let image = match essence {
        Some(ct) if ct.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("image/")) => true,
        Some(ct) if OPAQUE_CONTENT_TYPES.iter().any(|o| o.eq_ignore_ascii_case(ct)) => by_extension(),
        Some(_) => false,
        None => by_extension(),
    };

    if image { DocumentKind::Image } else { DocumentKind::File }
}

/// Boolean form of [`classify_document`].
#[must_use]
pub fn is_image(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    classify_document(content_type, file_name) == DocumentKind::Image
}

fn extension(file_name: &str) -> Option<&str> {
    file_name
        .trim()
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

// ---------------------------------------------------------------------------
// Overdue actions
// ---------------------------------------------------------------------------

/// Every action that is overdue at `now`, joined to its finding and to a
/// department display name.
///
/// The department is the action's own, else its finding's; with neither, the
/// action is attributed to `unassigned_label`. Output is ordered by due date,
/// then action id.
pub fn overdue_actions(
    hierarchy: &AuditHierarchy<'_>,
    actions: &[Action],
    now: DateTime<Utc>,
    resolver: &dyn DepartmentResolver,
    unassigned_label: &str,
) -> Vec<OverdueAction> {
    let mut overdue: Vec<OverdueAction> = actions
        .iter()
        .filter(|action| action.is_overdue(now))
        .map(|action| {
            let finding = hierarchy.finding_by_id(&action.finding_id);
            if finding.is_none() {
                tracing::debug!(
                    action = %action.id,
                    finding = %action.finding_id,
                    "compliance: overdue action has no finding in this report"
                );
            }

            let department = action
                .department_id
                .as_deref()
                .or_else(|| finding.and_then(|f| f.department_id.as_deref()))
                .map_or_else(|| unassigned_label.to_string(), |id| resolve_or_raw(resolver, id));

            let days_overdue = action
                .due_date
                .map_or(0, |due| (now - due).num_days());

            OverdueAction {
                action: action.clone(),
                finding: finding.cloned(),
                department,
                days_overdue,
            }
        })
        .collect();

    overdue.sort_by(|a, b| {
        a.action
            .due_date
            .cmp(&b.action.due_date)
            .then_with(|| a.action.id.cmp(&b.action.id))
    });

    tracing::debug!(
        total = actions.len(),
        overdue = overdue.len(),
        "compliance: overdue actions computed"
    );

    overdue
}

/// Overdue counts per department, largest first, ties by name.
#[must_use]
pub fn department_rollup(overdue: &[OverdueAction]) -> Vec<DeptCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in overdue {
        *counts.entry(entry.department.as_str()).or_default() += 1;
    }

    let mut rollup: Vec<DeptCount> = counts
        .into_iter()
        .map(|(name, count)| DeptCount {
            name: name.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the BTreeMap's name order among equal counts.
    rollup.sort_by(|a, b| b.count.cmp(&a.count));
    rollup
}

/// Finding counts per severity over the placed findings, most severe first.
/// Severities with no findings are included with a zero count.
#[must_use]
pub fn severity_breakdown(hierarchy: &AuditHierarchy<'_>) -> Vec<SeverityCount> {
    let mut counts: BTreeMap<Severity, usize> = BTreeMap::new();
    for finding in hierarchy.placed_findings() {
        *counts.entry(finding.severity).or_default() += 1;
    }

    Severity::DESCENDING
        .iter()
        .map(|&severity| SeverityCount {
            severity,
            count: counts.get(&severity).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::DepartmentDirectory;
    use crate::hierarchy::build_hierarchy;
    use crate::test_support::{action, audit, department, finding, item};
    use aud_core::enums::ActionStatus;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Some("image/png"), None, DocumentKind::Image)]
    #[case(Some("IMAGE/JPEG"), Some("scan.pdf"), DocumentKind::Image)]
    #[case(Some("image/svg+xml; charset=utf-8"), None, DocumentKind::Image)]
    #[case(Some("application/pdf"), Some("photo.png"), DocumentKind::File)]
    #[case(None, Some("photo.PNG"), DocumentKind::Image)]
    #[case(Some(""), Some("diagram.svg"), DocumentKind::Image)]
    #[case(Some("application/octet-stream"), Some("site.webp"), DocumentKind::Image)]
    #[case(None, Some("report.docx"), DocumentKind::File)]
    #[case(None, Some("no_extension"), DocumentKind::File)]
    #[case(None, Some("trailing."), DocumentKind::File)]
    #[case(None, None, DocumentKind::File)]
    #[case(Some("imagé/x"), None, DocumentKind::File)]
    fn classifies_documents(
        #[case] content_type: Option<&str>,
        #[case] file_name: Option<&str>,
        #[case] expected: DocumentKind,
    ) {
        assert_eq!(classify_document(content_type, file_name), expected);
        assert_eq!(
            is_image(content_type, file_name),
            expected == DocumentKind::Image
        );
    }

    #[test]
    fn overdue_iff_past_due_and_unsettled() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let audit = audit("aud-1");
        let items = vec![item("itm-1", "aud-1", Some("Safety"))];
        let findings = vec![finding("fnd-1", "aud-1", "itm-1")];
        let tree = build_hierarchy(&audit, &items, &findings, &[], "Unsectioned");

        let statuses = [
            ActionStatus::Open,
            ActionStatus::InProgress,
            ActionStatus::Resolved,
            ActionStatus::Closed,
        ];
        let offsets = [-2, -1, 0, 1];
        let mut actions = Vec::new();
        for (s, status) in statuses.iter().enumerate() {
            for (o, offset) in offsets.iter().enumerate() {
                let mut a = action(&format!("act-{s}-{o}"), "fnd-1", *status);
                a.due_date = Some(now + Duration::days(*offset));
                actions.push(a);
            }
        }

        let directory = DepartmentDirectory::default();
        let overdue = overdue_actions(&tree, &actions, now, &directory, "Unassigned");
        let ids: Vec<&str> = overdue.iter().map(|o| o.action.id.as_str()).collect();
        for a in &actions {
            let expected = a.due_date.is_some_and(|d| d < now) && !a.status.is_settled();
            assert_eq!(ids.contains(&a.id.as_str()), expected, "{}", a.id);
        }
        assert_eq!(ids, vec!["act-0-0", "act-1-0", "act-0-1", "act-1-1"]);
    }

    #[test]
    fn department_falls_back_to_finding_then_raw_id() {
        let now = Utc::now();
        let audit = audit("aud-1");
        let items = vec![item("itm-1", "aud-1", Some("Safety"))];
        let mut f = finding("fnd-1", "aud-1", "itm-1");
        f.department_id = Some("dep-qa".into());
        let findings = vec![f];
        let tree = build_hierarchy(&audit, &items, &findings, &[], "Unsectioned");

        let mut own = action("act-1", "fnd-1", ActionStatus::Open);
        own.department_id = Some("dep-ops".into());
        let mut inherited = action("act-2", "fnd-1", ActionStatus::Open);
        inherited.department_id = None;
        let mut unknown = action("act-3", "fnd-404", ActionStatus::Open);
        unknown.department_id = Some("dep-77".into());
        let mut nobody = action("act-4", "fnd-404", ActionStatus::Open);
        nobody.department_id = None;
        let actions: Vec<Action> = [own, inherited, unknown, nobody]
            .into_iter()
            .map(|mut a| {
                a.due_date = Some(now - Duration::days(3));
                a
            })
            .collect();

        let directory: DepartmentDirectory =
            [department("dep-ops", "Operations"), department("dep-qa", "Quality")]
                .iter()
                .collect();
        let overdue = overdue_actions(&tree, &actions, now, &directory, "Unassigned");
        let names: Vec<&str> = overdue.iter().map(|o| o.department.as_str()).collect();
        assert_eq!(names, vec!["Operations", "Quality", "dep-77", "Unassigned"]);
        assert!(overdue[2].finding.is_none());
        assert_eq!(overdue[0].days_overdue, 3);
    }

    #[test]
    fn rollup_sorts_by_count_then_name() {
        let entry = |name: &str| OverdueAction {
            action: action("act", "fnd", ActionStatus::Open),
            finding: None,
            department: name.to_string(),
            days_overdue: 1,
        };
        let overdue = vec![
            entry("Quality"),
            entry("Operations"),
            entry("Finance"),
            entry("Quality"),
            entry("Operations"),
            entry("Audit"),
        ];
        let rollup = department_rollup(&overdue);
        let pairs: Vec<(&str, usize)> = rollup.iter().map(|d| (d.name.as_str(), d.count)).collect();
        assert_eq!(
            pairs,
            vec![("Operations", 2), ("Quality", 2), ("Audit", 1), ("Finance", 1)]
        );
    }

    #[test]
    fn severity_breakdown_includes_zero_counts() {
        let audit = audit("aud-1");
        let items = vec![item("itm-1", "aud-1", None)];
        let mut critical = finding("fnd-1", "aud-1", "itm-1");
        critical.severity = Severity::Critical;
        let mut low = finding("fnd-2", "aud-1", "itm-1");
        low.severity = Severity::Low;
        let orphan = finding("fnd-3", "aud-1", "itm-404");
        let findings = vec![critical, low, orphan];
        let tree = build_hierarchy(&audit, &items, &findings, &[], "Unsectioned");

        let counts: Vec<(Severity, usize)> = severity_breakdown(&tree)
            .into_iter()
            .map(|c| (c.severity, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Severity::Critical, 1),
                (Severity::High, 0),
                (Severity::Medium, 0),
                (Severity::Low, 1),
            ]
        );
    }
}
