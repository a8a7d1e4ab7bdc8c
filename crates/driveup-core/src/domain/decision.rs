//! The Match Decider
//!
//! A pure, synchronous function from (candidate state, remote state,
//! flags) to an [`UploadDecision`]. No I/O, no side effects; everything
//! the decider needs has already been computed by the fingerprinter and
//! the index resolver. Keeping this pure is what makes the decision table
//! trivially testable.
//!
//! ## Decision table
//!
//! | remote entry | checksum verify | hash match | force | action            |
//! |--------------|-----------------|------------|-------|-------------------|
//! | absent       | -               | -          | no    | Upload (NotFound) |
//! | present      | off             | -          | no    | Skip (AlreadyIdentical) |
//! | present      | on              | yes        | no    | Skip (AlreadyIdentical) |
//! | present      | on              | no         | no    | Upload (ContentChanged) |
//! | any          | any             | any        | yes   | Upload (Forced)   |
//!
//! The local fingerprint is `Option` because the orchestrator only hashes
//! when a comparison can actually use the result (checksum verification
//! on, no force). Under verification, a missing hash on either side
//! counts as a mismatch: identity cannot be proven, so the file is
//! uploaded as changed.

use super::candidate::{DecisionReason, RemoteEntry, UploadAction, UploadDecision};
use super::newtypes::Fingerprint;

/// Decides whether a candidate should be uploaded or skipped.
///
/// # Arguments
/// * `fingerprint` - the candidate's content hash, when computed this cycle
/// * `remote` - the index snapshot entry matching the candidate's name,
///   if any
/// * `force` - upload regardless of match state
/// * `checksum_verify` - compare content hashes instead of trusting a
///   name match alone
pub fn decide(
    fingerprint: Option<&Fingerprint>,
    remote: Option<&RemoteEntry>,
    force: bool,
    checksum_verify: bool,
) -> UploadDecision {
    if force {
        return UploadDecision {
            action: UploadAction::Upload,
            reason: DecisionReason::Forced,
        };
    }

    let Some(entry) = remote else {
        return UploadDecision {
            action: UploadAction::Upload,
            reason: DecisionReason::NotFound,
        };
    };

    if !checksum_verify {
        // Name match alone is proof enough when verification is off
        return UploadDecision {
            action: UploadAction::Skip,
            reason: DecisionReason::AlreadyIdentical,
        };
    }

    match (fingerprint, &entry.md5) {
        (Some(local), Some(remote_md5)) if local == remote_md5 => UploadDecision {
            action: UploadAction::Skip,
            reason: DecisionReason::AlreadyIdentical,
        },
        _ => UploadDecision {
            action: UploadAction::Upload,
            reason: DecisionReason::ContentChanged,
        },
    }
}
