// Providers layer - outbound collaborators behind trait seams
pub mod email;
pub mod sms;

pub use email::{EmailSender, SmtpEmailSender};
pub use sms::{SemaphoreSmsGateway, SmsGateway};
