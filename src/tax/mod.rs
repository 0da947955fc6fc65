//! Tax module - Brazilian import and sale taxes (Remessa Conforme duty, ICMS, DAS)

pub mod icms;
pub mod import_duty;
pub mod output;

pub use icms::{icms_gross_up, rate_for_state, IcmsAssessment, IcmsState, ICMS_STATE_RATES};
pub use import_duty::{bracket_for, import_duty_usd, DutyBracket, IMPORT_DUTY_BRACKETS};
pub use output::{output_tax, output_tax_rate};
