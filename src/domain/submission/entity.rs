use bytes::Bytes;

use super::errors::SubmissionError;

/// Hard cap on one uploaded attachment.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Raw multipart fields exactly as the HTTP layer collected them, before validation.
///
/// This is the one transient entity of the system; it exists for the duration of a
/// single request and is consumed whole by [`Submission::from_form`].
#[derive(Debug, Default, Clone)]
pub struct SubmissionForm {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub comment: Option<String>,
    pub attachment: Option<UploadedFile>,
}

/// One file part as it arrived on the wire.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A validated submission, normalised and ready to be rendered into an email.
#[derive(Debug, Clone)]
pub struct Submission {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub city: String,
    pub area: String,
    pub comment: String,
    pub attachment: Option<Attachment>,
}

/// File content carried along with the composed message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Submission {
    /// Validate a raw form and normalise it for rendering.
    ///
    /// `email` and `phone` must be present and non-empty; the remaining text fields
    /// fall back to the `"-"` placeholder. An attachment above [`MAX_ATTACHMENT_BYTES`]
    /// is rejected before anything is composed, so a rejected submission never
    /// produces an outbound email.
    pub fn from_form(form: SubmissionForm) -> Result<Self, SubmissionError> {
        let email = required(form.email, "email")?;
        let phone = required(form.phone, "phone")?;

        let attachment = match form.attachment {
            Some(file) => {
                if file.data.len() > MAX_ATTACHMENT_BYTES {
                    return Err(SubmissionError::PayloadTooLarge {
                        size: file.data.len(),
                    });
                }
                Some(Attachment {
                    file_name: redecode_file_name(&file.file_name),
                    content_type: file.content_type,
                    data: file.data,
                })
            }
            None => None,
        };

        Ok(Self {
            email,
            phone,
            name: or_placeholder(form.name),
            city: or_placeholder(form.city),
            area: or_placeholder(form.area),
            comment: or_placeholder(form.comment),
            attachment,
        })
    }

    /// Plain-text message body, field labels in fixed order.
    pub fn body_text(&self) -> String {
        let file_line = self
            .attachment
            .as_ref()
            .map_or("не надано", |a| a.file_name.as_str());
        format!(
            "Нова пропозиція від користувача:\n\n\
             Ім'я: {}\n\
             Email: {}\n\
             Телефон: {}\n\
             Місто: {}\n\
             Площа приміщення: {}\n\
             Коментар: {}\n\
             Файл: {}\n",
            self.name, self.email, self.phone, self.city, self.area, self.comment, file_line
        )
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, SubmissionError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SubmissionError::MissingRequiredField(field)),
    }
}

fn or_placeholder(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-".to_string(),
    }
}

/// Multipart filenames are frequently transmitted as raw bytes and reach us decoded
/// one char per byte. When every char fits in a single byte, reinterpret that byte
/// sequence as UTF-8 so non-ASCII filenames render correctly; anything else is
/// already proper UTF-8 and passes through untouched.
fn redecode_file_name(raw: &str) -> String {
    if raw.is_ascii() || raw.chars().any(|c| c as u32 > 0xFF) {
        return raw.to_string();
    }
    let bytes: Vec<u8> = raw.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| raw.to_string())
}
