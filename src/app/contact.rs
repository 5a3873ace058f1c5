use std::sync::LazyLock;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use regex::Regex;

use crate::content::ContactSubmission;
use crate::error::PortfolioError;

pub const DEFAULT_ERROR_DISMISS: Duration = Duration::from_secs(5);

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Phone,
    Subject,
    Category,
    Date,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Subject,
        FormField::Category,
        FormField::Date,
        FormField::Message,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name *",
            Self::Email => "Email *",
            Self::Phone => "Phone",
            Self::Subject => "Subject *",
            Self::Category => "Project type *",
            Self::Date => "Preferred date (YYYY-MM-DD)",
            Self::Message => "Message *",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub category: String,
    pub date: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Subject => &self.subject,
            FormField::Category => &self.category,
            FormField::Date => &self.date,
            FormField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Subject => &mut self.subject,
            FormField::Category => &mut self.category,
            FormField::Date => &mut self.date,
            FormField::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every rule and report all violations at once.
    pub fn validate(&self) -> Result<ContactSubmission, PortfolioError> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < 2 {
            errors.push("Name must be at least 2 characters.".to_string());
        }
        if !is_valid_email(self.email.trim()) {
            errors.push("Please enter a valid email address.".to_string());
        }
        if self.subject.trim().chars().count() < 3 {
            errors.push("Subject must be at least 3 characters.".to_string());
        }
        if self.category.trim().is_empty() {
            errors.push("Please choose a project type.".to_string());
        }
        if self.message.trim().chars().count() < 10 {
            errors.push("Message must be at least 10 characters.".to_string());
        }

        let date = match self.date.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push("Preferred date must use the YYYY-MM-DD format.".to_string());
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(PortfolioError::Validation(errors));
        }

        let phone = self.phone.trim();
        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            subject: self.subject.trim().to_string(),
            category: self.category.trim().to_string(),
            message: self.message.trim().to_string(),
            date,
        })
    }
}

/// Recap shown once the message went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub name: String,
    pub subject: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub server_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Editing,
    Submitting(ContactSubmission),
    Sent(ContactReceipt),
}

#[derive(Debug, Clone)]
pub struct ContactFlow {
    pub form: ContactForm,
    pub focus: FormField,
    pub status: SubmitStatus,
    pub error: Option<String>,
    error_deadline: Option<Instant>,
    dismiss_after: Duration,
}

impl ContactFlow {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            focus: FormField::default(),
            status: SubmitStatus::Editing,
            error: None,
            error_deadline: None,
            dismiss_after,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting(_))
    }

    pub fn is_editing(&self) -> bool {
        !matches!(self.status, SubmitStatus::Sent(_))
    }

    pub fn error_deadline(&self) -> Option<Instant> {
        self.error_deadline
    }

    /// Validate and move to in-flight. `None` while already in flight or
    /// when validation failed (the error is then on display).
    pub fn begin_submit(&mut self, now: Instant) -> Option<ContactSubmission> {
        if !matches!(self.status, SubmitStatus::Editing) {
            return None;
        }
        match self.form.validate() {
            Ok(submission) => {
                self.dismiss_error();
                self.status = SubmitStatus::Submitting(submission.clone());
                Some(submission)
            }
            Err(e) => {
                self.show_error(e.to_string(), now);
                None
            }
        }
    }

    /// `category_name` is the display name of the submitted category.
    pub fn complete(&mut self, category_name: &str, server_message: Option<String>) -> bool {
        let SubmitStatus::Submitting(submission) = &self.status else {
            return false;
        };
        let receipt = ContactReceipt {
            name: submission.name.clone(),
            subject: submission.subject.clone(),
            category: category_name.to_string(),
            date: submission.date,
            server_message,
        };
        self.status = SubmitStatus::Sent(receipt);
        self.form.clear();
        self.focus = FormField::default();
        self.dismiss_error();
        true
    }

    pub fn fail(&mut self, error: String, now: Instant) {
        if self.is_submitting() {
            self.status = SubmitStatus::Editing;
        }
        self.show_error(error, now);
    }

    pub fn show_error(&mut self, error: String, now: Instant) {
        self.error = Some(error);
        self.error_deadline = Some(now + self.dismiss_after);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.error_deadline = None;
    }

    /// Hide the error once its display time is up.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.error_deadline {
            Some(deadline) if now >= deadline => {
                self.dismiss_error();
                true
            }
            _ => false,
        }
    }

    pub fn send_another(&mut self) {
        if matches!(self.status, SubmitStatus::Sent(_)) {
            self.status = SubmitStatus::Editing;
        }
    }

    pub fn input(&mut self, ch: char) {
        if self.is_submitting() || self.focus == FormField::Category {
            return;
        }
        self.form.field_mut(self.focus).push(ch);
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }
        if self.focus == FormField::Category {
            self.form.category.clear();
        } else {
            self.form.field_mut(self.focus).pop();
        }
    }

    /// Step the project type through `options`, where the empty string
    /// stands for "nothing chosen".
    pub fn cycle_category(&mut self, options: &[String], forward: bool) {
        if self.is_submitting() || options.is_empty() {
            return;
        }
        let len = options.len() + 1;
        let current = options
            .iter()
            .position(|o| *o == self.form.category)
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.form.category = if next == 0 {
            String::new()
        } else {
            options[next - 1].clone()
        };
    }
}

impl Default for ContactFlow {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_DISMISS)
    }
}
