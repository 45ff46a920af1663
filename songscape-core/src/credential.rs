//! Credential-selection seam.

/// Host-provided gate over API-key selection.
///
/// The controller never reads credential state from ambient globals; the host
/// environment injects an implementation, so tests substitute fakes. A host
/// without a selection dialog can report a credential whenever an ambient key
/// (config field or environment variable) is present.
pub trait CredentialGate: Send + Sync {
    /// Whether a credential is currently selected and usable.
    fn has_selected_credential(&self) -> bool;

    /// Ask the host to walk the user through selecting a credential.
    fn open_select_credential(&self);
}
