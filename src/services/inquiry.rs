//! Inquiry service
//!
//! Drives the inquiry state machine: RECEIVED inquiries get the configured
//! quote price, move to QUOTED and are published, then immediately move to
//! DONE and are published again — two observable events, never collapsed.
//! DONE and REJECTED are terminal; a message that would regress a terminal
//! inquiry is logged and ignored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{Inquiry, InquiryState};

pub struct InquiryService {
    inquiries: HashMap<String, Inquiry>,
    quote_price: Decimal,
    listeners: ListenerSet<Inquiry>,
}

impl InquiryService {
    pub fn new(quote_price: Decimal) -> Self {
        Self {
            inquiries: HashMap::new(),
            quote_price,
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Inquiry>>) {
        self.listeners.add(listener);
    }

    /// Latest state of an inquiry
    pub fn get(&self, inquiry_id: &str) -> Result<&Inquiry> {
        self.inquiries
            .get(inquiry_id)
            .ok_or_else(|| ServiceError::NotFound(inquiry_id.to_string()))
    }

    /// Inbound entry point used by the inquiries adapter
    pub fn on_message(&mut self, mut inquiry: Inquiry) {
        if let Some(existing) = self.inquiries.get(&inquiry.inquiry_id) {
            if existing.state.is_terminal() && inquiry.state.rank() <= existing.state.rank() {
                warn!(
                    inquiry_id = %inquiry.inquiry_id,
                    from = %existing.state,
                    to = %inquiry.state,
                    "ignoring regressing inquiry transition"
                );
                return;
            }
        }

        match inquiry.state {
            InquiryState::Received => {
                // Quote, publish, then complete and publish again
                inquiry.price = Some(self.quote_price);
                self.transition(inquiry.clone(), InquiryState::Quoted);
                self.transition(inquiry, InquiryState::Done);
            }
            InquiryState::Quoted => {
                self.transition(inquiry, InquiryState::Done);
            }
            InquiryState::Done | InquiryState::Rejected => {
                let state = inquiry.state;
                self.transition(inquiry, state);
            }
        }
    }

    fn transition(&mut self, mut inquiry: Inquiry, state: InquiryState) {
        inquiry.state = state;
        self.inquiries
            .insert(inquiry.inquiry_id.clone(), inquiry.clone());
        self.listeners.notify(&inquiry);
    }
}
