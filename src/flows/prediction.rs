//! Prediction and care-guide state for one page.
//!
//! Every change goes through a `begin_*` / `finish_*` pair. `begin_*` hands
//! out a ticket stamped with the current generation; a submission bumps the
//! generation, so responses that belong to an earlier submission are dropped
//! instead of overwriting newer state.

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{CareGuide, Prediction, PredictionResult, SoilForm};
use crate::services::ClientError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionFlow {
    /// Last submitted form values.
    pub form: SoilForm,
    pub is_loading: bool,
    pub result: Option<PredictionResult>,
    pub guide: Option<CareGuide>,
    pub guide_loading: bool,
    #[serde(skip)]
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideTicket {
    generation: u64,
    pub crop: String,
}

impl PredictionFlow {
    /// Start a submission. Clears the previous result and guide right away.
    /// Returns `None` while a prediction is already in flight.
    pub fn begin_submit(&mut self, form: SoilForm) -> Option<PredictionTicket> {
        if self.is_loading {
            debug!("Prediction already in flight, ignoring submit");
            return None;
        }

        self.generation += 1;
        self.form = form;
        self.is_loading = true;
        self.result = None;
        self.guide = None;
        self.guide_loading = false;

        Some(PredictionTicket {
            generation: self.generation,
        })
    }

    /// Apply the prediction service's answer. Failures are logged and leave
    /// the result empty. Returns whether the ticket was still current.
    pub fn finish_submit(
        &mut self,
        ticket: PredictionTicket,
        outcome: Result<Prediction, ClientError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale prediction response"
            );
            return false;
        }

        self.is_loading = false;
        match outcome {
            Ok(prediction) => self.result = Some(prediction.into()),
            Err(e) => error!(error = %e, "Crop prediction failed"),
        }
        true
    }

    /// A guide can be generated once per result.
    pub fn can_request_guide(&self) -> bool {
        self.result.is_some() && self.guide.is_none() && !self.guide_loading
    }

    /// Start generating a guide for the current result. `None` when there is
    /// no result, a guide already exists, or one is being generated.
    pub fn begin_guide(&mut self) -> Option<GuideTicket> {
        if !self.can_request_guide() {
            return None;
        }
        let crop = self.result.as_ref()?.crop.clone();

        self.guide_loading = true;
        Some(GuideTicket {
            generation: self.generation,
            crop,
        })
    }

    pub fn finish_guide(&mut self, ticket: GuideTicket, guide: CareGuide) -> bool {
        if ticket.generation != self.generation {
            debug!(crop = %ticket.crop, "Dropping guide for a superseded prediction");
            return false;
        }

        self.guide_loading = false;
        self.guide = Some(guide);
        true
    }
}
