//! Primary/Secondary pairing and batch linking

use crate::types::{
    DecodedBarcode, LabelRecord, MergedBarcode, PrimaryFields, SecondaryFields, SegmentKind,
};
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Order two records as (Primary, Secondary) if they are one of each
fn as_pair<'a>(
    a: &'a DecodedBarcode,
    b: &'a DecodedBarcode,
) -> Option<(&'a DecodedBarcode, &'a DecodedBarcode)> {
    match (a.kind, b.kind) {
        (SegmentKind::Primary, SegmentKind::Secondary) => Some((a, b)),
        (SegmentKind::Secondary, SegmentKind::Primary) => Some((b, a)),
        _ => None,
    }
}

/// Returns the Primary and Secondary fields when `a` and `b` link together
fn linked_fields<'a>(
    a: &'a DecodedBarcode,
    b: &'a DecodedBarcode,
) -> Option<(&'a DecodedBarcode, &'a PrimaryFields, &'a DecodedBarcode, &'a SecondaryFields)> {
    let (primary, secondary) = as_pair(a, b)?;
    let primary_fields = primary.primary.as_ref()?;
    let secondary_fields = secondary.secondary.as_ref()?;
    let link = secondary_fields.link_character?;

    (primary.check_character == link).then_some((
        primary,
        primary_fields,
        secondary,
        secondary_fields,
    ))
}

/// Check whether two decoded records are the two halves of one label
///
/// True when one record is a standalone Primary, the other a standalone
/// Secondary, and the Primary's check character equals the Secondary's link
/// character. Argument order does not matter. Concatenated records are
/// self-contained and never pair.
pub fn is_pair(a: &DecodedBarcode, b: &DecodedBarcode) -> bool {
    linked_fields(a, b).is_some()
}

/// Merge a linked Primary and Secondary into one record
///
/// Returns `None` when `is_pair` is false. The inputs are not modified.
pub fn merge(a: &DecodedBarcode, b: &DecodedBarcode) -> Option<MergedBarcode> {
    let (primary, primary_fields, secondary, secondary_fields) = linked_fields(a, b)?;

    Some(MergedBarcode {
        primary_raw: primary.raw.clone(),
        secondary_raw: secondary.raw.clone(),
        primary: primary_fields.clone(),
        secondary: secondary_fields.clone(),
        link_character: primary.check_character,
    })
}

/// Result of linking a batch of decoded records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Linked pairs, in the order their Primary appeared
    pub merged: Vec<MergedBarcode>,

    /// Concatenated records, which never need linking
    pub concatenated: Vec<DecodedBarcode>,

    /// Primaries with no matching Secondary
    pub unpaired_primaries: Vec<DecodedBarcode>,

    /// Secondaries with no matching Primary
    pub unpaired_secondaries: Vec<DecodedBarcode>,

    /// Records already marked `Merged`; these never take part in pairing
    #[serde(default)]
    pub ignored: Vec<DecodedBarcode>,
}

/// Link statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Number of records linked
    pub total: usize,

    /// Number of merged pairs
    pub merged: usize,

    /// Number of Concatenated records
    pub concatenated: usize,

    /// Number of standalone segments left without a partner
    pub unpaired: usize,

    /// Number of records skipped because they were already marked `Merged`
    #[serde(default)]
    pub ignored: usize,

    /// Percentage of standalone segments that ended up in a pair
    pub pairing_rate: f64,
}

impl LinkReport {
    /// Get statistics about this report
    pub fn stats(&self) -> LinkStats {
        let standalone = self.merged.len() * 2
            + self.unpaired_primaries.len()
            + self.unpaired_secondaries.len();
        let pairing_rate = if standalone == 0 {
            0.0
        } else {
            (self.merged.len() * 2) as f64 / standalone as f64 * 100.0
        };

        LinkStats {
            total: standalone + self.concatenated.len() + self.ignored.len(),
            merged: self.merged.len(),
            concatenated: self.concatenated.len(),
            unpaired: self.unpaired_primaries.len() + self.unpaired_secondaries.len(),
            ignored: self.ignored.len(),
            pairing_rate,
        }
    }

    /// One record per physical label: merged pairs, then Concatenated
    /// records, then the unpaired segments. Ignored records are left out.
    pub fn into_labels(self) -> Vec<LabelRecord> {
        self.merged
            .into_iter()
            .map(LabelRecord::from)
            .chain(self.concatenated.into_iter().map(LabelRecord::from))
            .chain(self.unpaired_primaries.into_iter().map(LabelRecord::from))
            .chain(self.unpaired_secondaries.into_iter().map(LabelRecord::from))
            .collect()
    }
}

/// Link a batch of decoded records into labels
///
/// Each Primary is paired with the earliest unused Secondary whose link
/// character equals the Primary's check character. Records whose kind is
/// already `Merged` are never paired; they are collected in
/// `LinkReport::ignored`.
pub fn link_labels(records: Vec<DecodedBarcode>) -> LinkReport {
    #[cfg(feature = "logging")]
    debug!("Linking {} decoded records", records.len());

    let mut report = LinkReport::default();
    let mut primaries = Vec::new();
    let mut secondaries: Vec<Option<DecodedBarcode>> = Vec::new();

    // link character -> indices into `secondaries`, in input order
    let mut by_link: HashMap<char, VecDeque<usize>> = HashMap::new();

    for record in records {
        match record.kind {
            SegmentKind::Primary => primaries.push(record),
            SegmentKind::Secondary => match record.link_character() {
                Some(link) => {
                    by_link.entry(link).or_default().push_back(secondaries.len());
                    secondaries.push(Some(record));
                }
                None => report.unpaired_secondaries.push(record),
            },
            SegmentKind::Concatenated => report.concatenated.push(record),
            SegmentKind::Merged => {
                #[cfg(feature = "logging")]
                warn!("Ignoring record marked as merged: {:?}", record.raw);

                report.ignored.push(record);
            }
        }
    }

    #[cfg(feature = "logging")]
    for (link, queue) in &by_link {
        if queue.len() > 1 {
            warn!(
                "{} secondaries share link character {:?}; pairing in scan order",
                queue.len(),
                link
            );
        }
    }

    for primary in primaries {
        let partner = by_link
            .get_mut(&primary.check_character)
            .and_then(VecDeque::pop_front)
            .and_then(|idx| secondaries[idx].take());

        let merged = partner
            .as_ref()
            .and_then(|secondary| merge(&primary, secondary));

        match merged {
            Some(merged) => {
                #[cfg(feature = "logging")]
                debug!(
                    "Linked {:?} -> {:?}",
                    merged.primary_raw, merged.secondary_raw
                );
                report.merged.push(merged);
            }
            None => {
                if let Some(secondary) = partner {
                    report.unpaired_secondaries.push(secondary);
                }
                report.unpaired_primaries.push(primary);
            }
        }
    }

    report
        .unpaired_secondaries
        .extend(secondaries.into_iter().flatten());

    #[cfg(feature = "logging")]
    debug!(
        "Linking complete: {} merged, {} concatenated, {} unpaired",
        report.merged.len(),
        report.concatenated.len(),
        report.unpaired_primaries.len() + report.unpaired_secondaries.len()
    );

    report
}
