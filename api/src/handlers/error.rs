//! Mapping from domain errors to HTTP responses.
//!
//! User-facing messages are bilingual (English/Spanish), selected from the
//! Accept-Language header; the deployments this backend serves are largely
//! Spanish-speaking.

use actix_web::{http::header, HttpRequest, HttpResponse};

use cr_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Language preference for error messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    /// Detect language preference from Accept-Language header
    pub fn from_request(req: &HttpRequest) -> Self {
        if let Some(header_value) = req.headers().get(header::ACCEPT_LANGUAGE) {
            if let Ok(header_str) = header_value.to_str() {
                // Example: "es-CO,es;q=0.9,en-US;q=0.8,en;q=0.7"
                let mut preferred = Language::English;
                let mut max_quality = 0.0_f32;

                for entry in header_str.split(',') {
                    let parts: Vec<&str> = entry.trim().split(';').collect();
                    let language = parts[0].to_lowercase();
                    let quality = parts
                        .get(1)
                        .and_then(|q| q.trim_start_matches("q=").parse::<f32>().ok())
                        .unwrap_or(1.0);

                    if language.starts_with("es") && quality > max_quality {
                        preferred = Language::Spanish;
                        max_quality = quality;
                    } else if language.starts_with("en") && quality > max_quality {
                        preferred = Language::English;
                        max_quality = quality;
                    }
                }

                return preferred;
            }
        }

        Language::English
    }
}

/// Helper function to get the localized message
fn get_localized_message(lang: Language, en: &str, es: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Spanish => es.to_string(),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    handle_domain_error_with_lang(error, Language::English)
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    log::error!("Domain Error: {:?}", error);

    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "invalid_credentials",
                    get_localized_message(
                        lang,
                        "Incorrect username or password",
                        "Usuario o contraseña incorrectos",
                    ),
                ))
            }
            AuthError::TooManyFailedLogins { minutes } => {
                HttpResponse::TooManyRequests().json(ErrorResponse::new(
                    "too_many_failed_logins",
                    get_localized_message(
                        lang,
                        &format!(
                            "Too many failed login attempts. Try again in {} minutes",
                            minutes
                        ),
                        &format!(
                            "Demasiados intentos fallidos. Intente de nuevo en {} minutos",
                            minutes
                        ),
                    ),
                ))
            }
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                "user_not_found",
                get_localized_message(lang, "User not found", "Usuario no encontrado"),
            )),
            AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
                "user_already_exists",
                get_localized_message(lang, "Username already taken", "El usuario ya existe"),
            )),
            AuthError::InsufficientPermissions => {
                HttpResponse::Forbidden().json(ErrorResponse::new(
                    "insufficient_permissions",
                    get_localized_message(
                        lang,
                        "You do not have permission to perform this action",
                        "No tiene permisos para realizar esta acción",
                    ),
                ))
            }
        },
        DomainError::Token(token_error) => {
            let code = match token_error {
                TokenError::TokenExpired => "token_expired",
                TokenError::InvalidSignature => "invalid_signature",
                _ => "invalid_token",
            };
            HttpResponse::Unauthorized().json(ErrorResponse::new(
                code,
                get_localized_message(
                    lang,
                    "Invalid or expired session",
                    "Sesión inválida o expirada",
                ),
            ))
        }
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", message),
        ),
        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", validation_error.to_string()),
        ),
        DomainError::BusinessRule { message } => HttpResponse::Conflict().json(
            ErrorResponse::new("business_rule_violation", message),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            get_localized_message(
                lang,
                &format!("{} not found", resource),
                &format!("{} no encontrado", resource),
            ),
        )),
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "unauthorized",
            get_localized_message(lang, "Authentication required", "Autenticación requerida"),
        )),
        DomainError::Internal { .. } => {
            // Internals never leak to the client.
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                get_localized_message(
                    lang,
                    "An internal error occurred",
                    "Ocurrió un error interno",
                ),
            ))
        }
    }
}

/// Render validator errors as a 400 with field details
pub fn handle_validation_errors(
    errors: validator::ValidationErrors,
    lang: Language,
) -> HttpResponse {
    let mut details = std::collections::HashMap::new();
    details.insert("validation_errors".to_string(), serde_json::json!(errors));

    HttpResponse::BadRequest().json(
        ErrorResponse::new(
            "validation_error",
            get_localized_message(lang, "Invalid request data", "Datos de solicitud inválidos"),
        )
        .with_details(details),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[test]
    fn test_language_detection_prefers_spanish() {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "es-CO,es;q=0.9,en;q=0.5"))
            .to_http_request();
        assert_eq!(Language::from_request(&req), Language::Spanish);
    }

    #[test]
    fn test_language_detection_defaults_to_english() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(Language::from_request(&req), Language::English);
    }

    #[test]
    fn test_lockout_maps_to_429() {
        let response = handle_domain_error(DomainError::Auth(AuthError::TooManyFailedLogins {
            minutes: 115,
        }));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_invalid_credentials_map_to_401() {
        let response = handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let response = handle_domain_error(DomainError::Internal {
            message: "database exploded".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
