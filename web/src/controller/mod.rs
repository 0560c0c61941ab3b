pub(crate) mod attendee_controller;
pub(crate) mod health_check_controller;
pub(crate) mod meeting_controller;
pub(crate) mod transcript_controller;
