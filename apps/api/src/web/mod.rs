// The single-page form: render, submit for advice, download the plan PDF.

pub mod handlers;
pub mod page;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{plan_filename, PDF_MIME};
use crate::session::session_cookie;

/// Wraps PDF bytes in an attachment response named after the user.
pub fn pdf_attachment(bytes: Vec<u8>, name: &str) -> Result<Response, AppError> {
    let filename = plan_filename(name);
    let disposition = content_disposition(&filename);
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    if ascii == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            percent_encode(filename)
        )
    }
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Adds the session cookie to a response when the session was just started.
pub fn with_session_cookie(mut response: Response, id: Uuid, is_new: bool) -> Response {
    if is_new {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(id)) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_name_disposition() {
        assert_eq!(
            content_disposition("diet_and_workout_plan_for_Alice.pdf"),
            "attachment; filename=\"diet_and_workout_plan_for_Alice.pdf\""
        );
    }

    #[test]
    fn test_non_ascii_name_gets_encoded_variant() {
        let value = content_disposition("diet_and_workout_plan_for_José.pdf");
        assert!(value.contains("filename=\"diet_and_workout_plan_for_Jos_.pdf\""));
        assert!(value.contains("filename*=UTF-8''diet_and_workout_plan_for_Jos%C3%A9.pdf"));
        assert!(HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_pdf_attachment_headers() {
        let response = pdf_attachment(b"%PDF-1.3".to_vec(), "Alice").unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"diet_and_workout_plan_for_Alice.pdf\""
        );
    }
}
