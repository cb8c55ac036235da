//! Hierarchy builder: flat record collections → Audit → Section → Checklist
//! → Finding → Attachment tree.
//!
//! The input slices are the arena. The hierarchy stores only indices into
//! them plus two lookup maps (`item id → index`, `finding id → index`), so a
//! rebuild on every data refresh costs a handful of `Vec`s and no clones.
//! Owned, serializable views are produced on demand by [`AuditHierarchy::to_sections`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};

use aud_core::entities::{Attachment, Audit, ChecklistItem, Finding};
use aud_core::errors::DataIntegrityWarning;
use aud_core::responses::{ChecklistEntry, DocumentEntry, FindingEntry, SectionGroup};

use crate::compliance::classify_document;

/// One section: a label and the indices of its checklist items, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNode {
    pub name: String,
    pub unsectioned: bool,
    pub items: Vec<usize>,
}

#[derive(Debug)]
pub struct AuditHierarchy<'a> {
    audit: &'a Audit,
    items: &'a [ChecklistItem],
    findings: &'a [Finding],
    attachments: &'a [Attachment],
    sections: Vec<SectionNode>,
    /// Per item index: indices of its findings.
    item_findings: Vec<Vec<usize>>,
    /// Per finding index: indices of its attachments.
    finding_documents: Vec<Vec<usize>>,
    audit_documents: Vec<usize>,
    item_index: HashMap<&'a str, usize>,
    finding_index: HashMap<&'a str, usize>,
    warnings: Vec<DataIntegrityWarning>,
}

/// Assemble the report tree for `audit`.
///
/// Sections appear in first-seen order with the unsectioned group last.
/// Records that cannot be placed are dropped and reported through
/// [`AuditHierarchy::warnings`].
pub fn build_hierarchy<'a>(
    audit: &'a Audit,
    items: &'a [ChecklistItem],
    findings: &'a [Finding],
    attachments: &'a [Attachment],
    unsectioned_label: &str,
) -> AuditHierarchy<'a> {
    let mut tree = AuditHierarchy {
        audit,
        items,
        findings,
        attachments,
        sections: Vec::new(),
        item_findings: vec![Vec::new(); items.len()],
        finding_documents: vec![Vec::new(); findings.len()],
        audit_documents: Vec::new(),
        item_index: HashMap::with_capacity(items.len()),
        finding_index: HashMap::with_capacity(findings.len()),
        warnings: Vec::new(),
    };

    tree.place_items(unsectioned_label);
    tree.attach_findings();
    tree.attach_documents();

    tracing::debug!(
        audit = %audit.id,
        sections = tree.sections.len(),
        items = tree.item_index.len(),
        findings = tree.finding_index.len(),
        warnings = tree.warnings.len(),
        "hierarchy built"
    );

    tree
}

impl<'a> AuditHierarchy<'a> {
    fn place_items(&mut self, unsectioned_label: &str) {
        let unsectioned_label = unsectioned_label.trim();
        let mut section_slots: HashMap<&'a str, usize> = HashMap::new();
        let mut unsectioned = Vec::new();
        let items = self.items;

        for (idx, item) in items.iter().enumerate() {
            if item.audit_id != self.audit.id {
                tracing::warn!(
                    item = %item.id,
                    audit = %item.audit_id,
                    expected = %self.audit.id,
                    "hierarchy: dropping checklist item from another audit"
                );
                self.warnings.push(DataIntegrityWarning::ForeignChecklistItem {
                    item_id: item.id.clone(),
                    audit_id: item.audit_id.clone(),
                });
                continue;
            }

            match self.item_index.entry(item.id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(item = %item.id, "hierarchy: duplicate checklist item id");
                    self.warnings.push(DataIntegrityWarning::DuplicateChecklistItem {
                        item_id: item.id.clone(),
                    });
                }
            }

            match item.section_label() {
                Some(label) if label != unsectioned_label => {
                    let slot = *section_slots.entry(label).or_insert_with(|| {
                        self.sections.push(SectionNode {
                            name: label.to_string(),
                            unsectioned: false,
                            items: Vec::new(),
                        });
                        self.sections.len() - 1
                    });
                    self.sections[slot].items.push(idx);
                }
                _ => unsectioned.push(idx),
            }
        }

        if !unsectioned.is_empty() {
            self.sections.push(SectionNode {
                name: unsectioned_label.to_string(),
                unsectioned: true,
                items: unsectioned,
            });
        }
    }

    fn attach_findings(&mut self) {
        let findings = self.findings;
        for (idx, finding) in findings.iter().enumerate() {
            if finding.audit_id != self.audit.id {
                tracing::warn!(
                    finding = %finding.id,
                    audit = %finding.audit_id,
                    expected = %self.audit.id,
                    "hierarchy: dropping finding from another audit"
                );
                self.warnings.push(DataIntegrityWarning::ForeignFinding {
                    finding_id: finding.id.clone(),
                    audit_id: finding.audit_id.clone(),
                });
                continue;
            }

            let Some(&item_idx) = self.item_index.get(finding.audit_item_id.as_str()) else {
                tracing::warn!(
                    finding = %finding.id,
                    item = %finding.audit_item_id,
                    "hierarchy: dropping finding with unknown checklist item"
                );
                self.warnings.push(DataIntegrityWarning::OrphanFinding {
                    finding_id: finding.id.clone(),
                    audit_item_id: finding.audit_item_id.clone(),
                });
                continue;
            };

            match self.finding_index.entry(finding.id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                    self.item_findings[item_idx].push(idx);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        finding = %finding.id,
                        item = %finding.audit_item_id,
                        "hierarchy: dropping duplicate finding id"
                    );
                    self.warnings.push(DataIntegrityWarning::DuplicateFinding {
                        finding_id: finding.id.clone(),
                    });
                }
            }
        }
    }

    fn attach_documents(&mut self) {
        let attachments = self.attachments;
        for (idx, attachment) in attachments.iter().enumerate() {
            match attachment.finding_id.as_deref() {
                Some(finding_id) => {
                    if let Some(&finding_idx) = self.finding_index.get(finding_id) {
                        self.finding_documents[finding_idx].push(idx);
                        continue;
                    }
                }
                None if attachment.audit_id.as_deref() == Some(self.audit.id.as_str()) => {
                    self.audit_documents.push(idx);
                    continue;
                }
                None => {}
            }

            tracing::warn!(
                attachment = %attachment.id,
                finding = ?attachment.finding_id,
                "hierarchy: dropping attachment without an owner in this audit"
            );
            self.warnings.push(DataIntegrityWarning::OrphanAttachment {
                attachment_id: attachment.id.clone(),
                finding_id: attachment.finding_id.clone(),
            });
        }
    }

    #[must_use]
    pub const fn audit(&self) -> &'a Audit {
        self.audit
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionNode] {
        &self.sections
    }

    #[must_use]
    pub fn warnings(&self) -> &[DataIntegrityWarning] {
        &self.warnings
    }

    /// Consume the hierarchy's warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<DataIntegrityWarning> {
        self.warnings
    }

    /// Finding by id, restricted to findings placed in the tree.
    #[must_use]
    pub fn finding_by_id(&self, finding_id: &str) -> Option<&'a Finding> {
        self.finding_index.get(finding_id).map(|&idx| &self.findings[idx])
    }

    /// Findings of the item at `item_idx`, in input order.
    pub fn findings_of(&self, item_idx: usize) -> impl Iterator<Item = (usize, &'a Finding)> + '_ {
        let findings = self.findings;
        self.item_findings[item_idx]
            .iter()
            .map(move |&idx| (idx, &findings[idx]))
    }

    /// Attachments of the finding at `finding_idx`, in input order.
    pub fn documents_of(&self, finding_idx: usize) -> impl Iterator<Item = &'a Attachment> + '_ {
        let attachments = self.attachments;
        self.finding_documents[finding_idx]
            .iter()
            .map(move |&idx| &attachments[idx])
    }

    /// Every finding placed in the tree, in tree order.
    pub fn placed_findings(&self) -> impl Iterator<Item = &'a Finding> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter())
            .flat_map(|&item_idx| self.findings_of(item_idx).map(|(_, f)| f))
    }

    /// Materialise the owned section views, deriving finding status at `now`.
    #[must_use]
    pub fn to_sections(&self, now: DateTime<Utc>) -> Vec<SectionGroup> {
        self.sections
            .iter()
            .map(|section| SectionGroup {
                name: section.name.clone(),
                unsectioned: section.unsectioned,
                items: section
                    .items
                    .iter()
                    .map(|&item_idx| ChecklistEntry {
                        item: self.items[item_idx].clone(),
                        findings: self
                            .findings_of(item_idx)
                            .map(|(finding_idx, finding)| FindingEntry {
                                finding: finding.clone(),
                                status: finding.status_at(now),
                                documents: self.documents_of(finding_idx).map(document_entry).collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Documents attached to the audit itself.
    #[must_use]
    pub fn audit_documents(&self) -> Vec<DocumentEntry> {
        self.audit_documents
            .iter()
            .map(|&idx| document_entry(&self.attachments[idx]))
            .collect()
    }
}

fn document_entry(attachment: &Attachment) -> DocumentEntry {
    DocumentEntry {
        attachment: attachment.clone(),
        kind: classify_document(
            attachment.content_type.as_deref(),
            attachment.file_name.as_deref(),
        ),
        uri: None,
    }
}
