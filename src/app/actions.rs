use std::time::Instant;

use crate::content::{
    Category, ContactSubmission, ContentDocument, Pagination, Photo, Photographer, ResourceKind,
    ResourceRequest, Service, Testimonial,
};

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    Select,
    Back,
    SwitchPane,
    Refresh,
    OpenInBrowser,
    Quit,

    // Gallery
    NextFilter,
    PreviousFilter,
    ToggleViewMode,
    NextPage,
    PreviousPage,

    // Lightbox
    LightboxNext,
    LightboxPrevious,
    LightboxClose,

    // Testimonials
    SetTestimonial(usize),
    StepTestimonial { forward: bool },
    VisibilityChanged(bool),

    // Contact form
    FormInput(char),
    FormBackspace,
    FormNextField,
    FormPreviousField,
    FormCycleCategory { forward: bool },
    SubmitContact,
    SendAnother,

    // Background results
    DataLoaded(DataPayload),
    LoadFailed { kind: ResourceKind, error: String },
    ContactSubmitted { server_message: Option<String> },
    ContactFailed(String),

    /// A state deadline (carousel or error dismissal) came due.
    Tick(Instant),
}

#[derive(Debug)]
pub enum DataPayload {
    Document(ContentDocument),
    Photographer(Photographer),
    Categories(Vec<Category>),
    Photos {
        category: Option<String>,
        photos: Vec<Photo>,
        pagination: Option<Pagination>,
    },
    Testimonials(Vec<Testimonial>),
    Services(Vec<Service>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    LoadDocument,
    /// `force` skips the snapshot store.
    Fetch {
        request: ResourceRequest,
        force: bool,
    },
    SubmitContact(ContactSubmission),
    OpenUrl(String),
}
