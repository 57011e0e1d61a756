//! The editing session: raw token and decomposed fields kept in sync.
//!
//! An [`Editor`] owns one session. Every input event (raw token, header,
//! payload or secret) is one transition. A transition starts only from
//! [`Phase::Idle`] and holds the phase until it finishes, including while
//! a signature is being computed. An event that arrives in the meantime
//! is dropped and reported as [`EditOutcome::Dropped`]; nothing is queued.
//!
//! The editor is single-threaded: it uses `Cell`/`RefCell` and never holds
//! a session borrow across an await.

use std::cell::{Cell, RefCell};
use std::fmt;

use zeroize::Zeroizing;

use crate::core::signer;
use crate::core::token::{self, OriginalSegments};

/// Where the editor is in its transition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ApplyingRawEdit,
    ApplyingFieldEdit,
}

/// The verification indicator shown next to the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// The signature matches the current secret.
    Valid,
    /// Anything short of a verified signature.
    Invalid,
    /// No token is loaded.
    Absent,
}

impl VerificationStatus {
    fn from_verified(verified: bool) -> Self {
        if verified { Self::Valid } else { Self::Invalid }
    }

    /// Short machine-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Absent => "absent",
        }
    }

    /// Human-readable description of the state.
    pub fn description(self) -> &'static str {
        match self {
            Self::Valid => "Valid signature: cryptographic verification successful",
            Self::Invalid => "Invalid signature: cryptographic verification failed",
            Self::Absent => "No token loaded",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An editable JSON part of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Header,
    Payload,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Payload => "payload",
        }
    }
}

/// Result of submitting an input event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The transition ran to completion.
    Applied,
    /// Another transition was in flight; the event was discarded.
    Dropped,
}

/// Output handles the editor renders into.
///
/// Implementations decide how each field is shown. The editor calls these
/// synchronously from inside a transition.
pub trait EditorView {
    fn render_header(&mut self, text: &str);
    fn render_payload(&mut self, text: &str);
    fn render_secret(&mut self, secret: &str);
    fn render_token(&mut self, token: &str);
    fn render_status(&mut self, status: VerificationStatus);
}

#[derive(Default)]
struct Session {
    token: String,
    header_text: String,
    payload_text: String,
    secret: Zeroizing<String>,
    status: Option<VerificationStatus>,
    original: OriginalSegments,
    edited: bool,
    reverted: Vec<Field>,
}

impl Session {
    fn status(&self) -> VerificationStatus {
        self.status.unwrap_or(VerificationStatus::Absent)
    }
}

/// Resets the phase to idle when a transition ends.
struct TransitionGuard<'a> {
    phase: &'a Cell<Phase>,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(Phase::Idle);
    }
}

/// One token editing session bound to a view.
pub struct Editor<V: EditorView> {
    phase: Cell<Phase>,
    session: RefCell<Session>,
    view: RefCell<V>,
}

impl<V: EditorView> fmt::Debug for Editor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session.borrow();
        f.debug_struct("Editor")
            .field("phase", &self.phase.get())
            .field("token", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("status", &session.status())
            .field("edited", &session.edited)
            .finish()
    }
}

impl<V: EditorView> Editor<V> {
    /// Start a session and render its initial, empty state into `view`.
    pub fn attach(view: V) -> Self {
        let editor = Self {
            phase: Cell::new(Phase::Idle),
            session: RefCell::new(Session::default()),
            view: RefCell::new(view),
        };
        editor.render_all();
        editor
    }

    /// End the session and hand the view back.
    ///
    /// The secret is wiped when the session is dropped here.
    pub fn teardown(self) -> V {
        tracing::debug!("editor session torn down");
        let Self { session, view, .. } = self;
        drop(session);
        view.into_inner()
    }

    /// Apply an edit of the raw token text.
    pub async fn edit_token(&self, raw: &str) -> EditOutcome {
        let Some(_guard) = self.begin(Phase::ApplyingRawEdit) else {
            return EditOutcome::Dropped;
        };

        if raw.is_empty() {
            self.reset();
            return EditOutcome::Applied;
        }

        self.session.borrow_mut().token = raw.to_string();
        self.view.borrow_mut().render_token(raw);

        let decoded = token::split(raw)
            .and_then(|segments| token::decode_parts(&segments).map(|parts| (segments, parts)));

        let (segments, parts) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "token could not be decoded; keeping previous fields");
                self.set_status(VerificationStatus::Invalid);
                return EditOutcome::Applied;
            }
        };

        let header_text = token::pretty_json(&parts.header);
        let payload_text = token::pretty_json(&parts.payload);
        {
            let mut view = self.view.borrow_mut();
            view.render_header(&header_text);
            view.render_payload(&payload_text);
        }

        let secret = {
            let mut session = self.session.borrow_mut();
            session.header_text = header_text;
            session.payload_text = payload_text;
            session.original = OriginalSegments::from(segments);
            session.edited = false;
            session.reverted.clear();
            session.secret.clone()
        };

        let verified = signer::verify(raw, &secret).await;
        self.set_status(VerificationStatus::from_verified(verified));
        EditOutcome::Applied
    }

    /// Apply an edit of the header or payload JSON text.
    ///
    /// Text that is not valid JSON is kept in the field, but the token
    /// falls back to the last good segment for it; see [`Self::reverted_fields`].
    pub async fn edit_field(&self, field: Field, text: &str) -> EditOutcome {
        let Some(_guard) = self.begin(Phase::ApplyingFieldEdit) else {
            return EditOutcome::Dropped;
        };

        {
            let mut session = self.session.borrow_mut();
            session.edited = true;
            match field {
                Field::Header => session.header_text = text.to_string(),
                Field::Payload => session.payload_text = text.to_string(),
            }
        }
        {
            let mut view = self.view.borrow_mut();
            match field {
                Field::Header => view.render_header(text),
                Field::Payload => view.render_payload(text),
            }
        }

        self.recompose().await;
        EditOutcome::Applied
    }

    /// Apply an edit of the secret.
    ///
    /// A signed token is re-verified against its existing signature. If a
    /// header or payload was edited since the token was loaded, the token
    /// is also re-signed under the new secret.
    pub async fn edit_secret(&self, secret: &str) -> EditOutcome {
        let Some(_guard) = self.begin(Phase::ApplyingFieldEdit) else {
            return EditOutcome::Dropped;
        };

        let secret = Zeroizing::new(secret.trim().to_string());
        self.view.borrow_mut().render_secret(&secret);

        let (token, edited) = {
            let mut session = self.session.borrow_mut();
            session.secret = secret.clone();
            (session.token.clone(), session.edited)
        };

        if token.split('.').count() == 3 {
            let verified = signer::verify(&token, &secret).await;
            self.set_status(VerificationStatus::from_verified(verified));
        }

        if edited {
            self.recompose().await;
        }
        EditOutcome::Applied
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn token(&self) -> String {
        self.session.borrow().token.clone()
    }

    pub fn header_text(&self) -> String {
        self.session.borrow().header_text.clone()
    }

    pub fn payload_text(&self) -> String {
        self.session.borrow().payload_text.clone()
    }

    pub fn status(&self) -> VerificationStatus {
        self.session.borrow().status()
    }

    /// Whether a header or payload was edited since the last token load.
    pub fn is_edited(&self) -> bool {
        self.session.borrow().edited
    }

    /// Fields whose text failed to encode in the last recomposition and
    /// were replaced by their original segment.
    pub fn reverted_fields(&self) -> Vec<Field> {
        self.session.borrow().reverted.clone()
    }

    pub fn original_segments(&self) -> OriginalSegments {
        self.session.borrow().original.clone()
    }

    fn begin(&self, next: Phase) -> Option<TransitionGuard<'_>> {
        let current = self.phase.get();
        if current != Phase::Idle {
            tracing::debug!(?current, ?next, "edit dropped: transition in progress");
            return None;
        }
        self.phase.set(next);
        Some(TransitionGuard { phase: &self.phase })
    }

    /// Rebuild the token from the header and payload fields.
    ///
    /// Must run inside a transition.
    async fn recompose(&self) {
        let (header_text, payload_text, original, secret) = {
            let session = self.session.borrow();
            if session.header_text.is_empty() || session.payload_text.is_empty() {
                tracing::debug!("recomposition skipped: header or payload is empty");
                return;
            }
            (
                session.header_text.clone(),
                session.payload_text.clone(),
                session.original.clone(),
                session.secret.clone(),
            )
        };

        let mut reverted = Vec::new();
        let header = encode_or_fallback(Field::Header, &header_text, &original.header, &mut reverted);
        let payload =
            encode_or_fallback(Field::Payload, &payload_text, &original.payload, &mut reverted);

        let signature = if secret.is_empty() {
            None
        } else {
            match signer::sign(&header, &payload, &secret).await {
                Ok(signature) => Some(signature),
                Err(e) => {
                    tracing::warn!(error = %e, "could not sign token; leaving it unsigned");
                    None
                }
            }
        };

        let recomposed = token::reassemble(&header, &payload, signature.as_deref());
        {
            let mut session = self.session.borrow_mut();
            session.token = recomposed.clone();
            session.reverted = reverted;
        }
        self.view.borrow_mut().render_token(&recomposed);

        let verified = signer::verify(&recomposed, &secret).await;
        self.set_status(VerificationStatus::from_verified(verified));
    }

    fn reset(&self) {
        *self.session.borrow_mut() = Session::default();
        self.render_all();
    }

    fn render_all(&self) {
        let session = self.session.borrow();
        let mut view = self.view.borrow_mut();
        view.render_token(&session.token);
        view.render_header(&session.header_text);
        view.render_payload(&session.payload_text);
        view.render_secret(&session.secret);
        view.render_status(session.status());
    }

    fn set_status(&self, status: VerificationStatus) {
        self.session.borrow_mut().status = Some(status);
        self.view.borrow_mut().render_status(status);
    }
}

fn encode_or_fallback(
    field: Field,
    text: &str,
    original: &str,
    reverted: &mut Vec<Field>,
) -> String {
    match token::encode_json_segment(text, field.name()) {
        Ok(segment) => segment,
        Err(e) => {
            tracing::warn!(error = %e, "edit not encodable; using the last good segment");
            reverted.push(field);
            original.to_string()
        }
    }
}
