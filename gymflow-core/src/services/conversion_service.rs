//! Visitor-to-client conversion workflow.
//!
//! A small state machine driving the club picker:
//! `Idle` -> `ClubPickerOpen` -> `Submitting` -> back to `Idle` on success,
//! or back to `ClubPickerOpen` on failure so the user can correct and
//! resubmit without re-selecting the visitor.

use std::sync::Arc;

use gymflow_gateway::{Club, ConversionPayload, ConversionReceipt, Visitor};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::generate_club_code;
use crate::validation::ConversionForm;

/// Workflow state.
#[derive(Debug, Clone)]
pub enum ConversionState {
    /// No conversion in progress.
    Idle,
    /// The club picker is open for `visitor`. `clubs` is empty when the
    /// club fetch failed; closing and reopening retries it.
    ClubPickerOpen {
        /// Visitor being converted.
        visitor: Visitor,
        /// Clubs offered for selection.
        clubs: Vec<Club>,
    },
    /// The conversion request is in flight.
    Submitting {
        /// Visitor being converted.
        visitor: Visitor,
    },
}

/// What a successful conversion hands back to the caller.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// CIN of the converted visitor.
    pub cin: String,
    /// The payload that was committed.
    pub payload: ConversionPayload,
    /// The backend's confirmation.
    pub receipt: ConversionReceipt,
}

/// The conversion workflow for one picker instance.
pub struct ConversionWorkflow {
    ctx: Arc<ServiceContext>,
    state: ConversionState,
}

impl ConversionWorkflow {
    /// Creates an idle workflow.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: ConversionState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Whether the picker is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ConversionState::ClubPickerOpen { .. })
    }

    /// The clubs currently offered, when the picker is open.
    #[must_use]
    pub fn clubs(&self) -> &[Club] {
        match &self.state {
            ConversionState::ClubPickerOpen { clubs, .. } => clubs,
            _ => &[],
        }
    }

    /// Opens the picker for a non-terminal visitor and fetches the club
    /// list.
    ///
    /// On a failed club fetch the picker stays open with an empty club list
    /// and the error is returned; the user retries by closing and reopening.
    pub async fn open(&mut self, cin: &str) -> CoreResult<()> {
        let visitor = self
            .ctx
            .store
            .get(cin)
            .await
            .ok_or_else(|| CoreError::VisitorNotFound(cin.to_string()))?;
        if visitor.status.is_terminal() {
            return Err(CoreError::AlreadyConverted(cin.to_string()));
        }

        self.state = ConversionState::ClubPickerOpen {
            visitor,
            clubs: Vec::new(),
        };

        let clubs = self.ctx.guard(self.ctx.gateway.list_clubs()).await?;
        if let ConversionState::ClubPickerOpen { clubs: slot, .. } = &mut self.state {
            *slot = clubs;
        }
        Ok(())
    }

    /// Validates the form and submits the conversion.
    ///
    /// Preconditions checked before any network call: the picker is open, a
    /// club is selected, the visitor carries an identifier, and the form
    /// passes schema validation. On success exactly one store record is
    /// marked converted; on failure the picker reopens with the same visitor
    /// and clubs.
    pub async fn submit(&mut self, form: &ConversionForm) -> CoreResult<ConversionOutcome> {
        let (visitor, clubs) = match &self.state {
            ConversionState::ClubPickerOpen { visitor, clubs } => {
                (visitor.clone(), clubs.clone())
            }
            _ => return Err(CoreError::WorkflowClosed),
        };

        if visitor.cin.trim().is_empty() {
            return Err(CoreError::VisitorNotFound(visitor.cin));
        }

        // Stale/duplicate guard: someone else may have converted this
        // visitor while the picker was open.
        if let Some(current) = self.ctx.store.get(&visitor.cin).await {
            if current.status.is_terminal() {
                self.state = ConversionState::Idle;
                return Err(CoreError::AlreadyConverted(visitor.cin));
            }
        }

        let club_id = form.club_id.ok_or(CoreError::NoClubSelected)?;
        let club = clubs
            .iter()
            .find(|c| c.id == club_id)
            .ok_or(CoreError::UnknownClub(club_id))?;
        let fields = form.validate()?;

        let payload = ConversionPayload {
            code: generate_club_code(&club.name),
            club_name: club.name.clone(),
            email: fields.email,
            sex: fields.sex,
            client_type: fields.client_type,
            address: fields.address,
            birth_date: fields.birth_date,
            status: fields.status,
            notes: fields.notes,
        };

        self.state = ConversionState::Submitting {
            visitor: visitor.clone(),
        };

        match self
            .ctx
            .guard(self.ctx.gateway.convert_visitor(&visitor.cin, &payload))
            .await
        {
            Ok(receipt) => {
                self.ctx
                    .store
                    .apply_conversion(&visitor.cin, &payload.club_name)
                    .await;
                log::info!("Visitor {} converted into club {}", visitor.cin, payload.club_name);
                self.state = ConversionState::Idle;
                Ok(ConversionOutcome {
                    cin: visitor.cin,
                    payload,
                    receipt,
                })
            }
            Err(e) => {
                self.state = ConversionState::ClubPickerOpen { visitor, clubs };
                Err(e)
            }
        }
    }

    /// Closes the picker without converting.
    pub fn close(&mut self) {
        self.state = ConversionState::Idle;
    }

    /// Self-closes when the selected visitor is observed to already be
    /// converted (e.g. after a background reload), guarding against stale
    /// duplicate conversion attempts.
    pub async fn sync_with_store(&mut self) {
        let cin = match &self.state {
            ConversionState::ClubPickerOpen { visitor, .. }
            | ConversionState::Submitting { visitor } => visitor.cin.clone(),
            ConversionState::Idle => return,
        };
        if let Some(current) = self.ctx.store.get(&cin).await {
            if current.status.is_terminal() {
                log::debug!("Visitor {cin} already converted, closing picker");
                self.state = ConversionState::Idle;
            }
        }
    }
}
