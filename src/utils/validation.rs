// ==================== VALIDATION ENGINE ====================
// Regras puras aplicadas aos campos do usuário antes de qualquer escrita.
// As mesmas funções validam payloads de criação e de atualização parcial.

use crate::models::UpdateUserRequest;
use crate::utils::error::{AppError, FieldViolation};

/// Name: não pode ser vazio, apenas letras.
pub fn validate_name(value: &str) -> Result<(), AppError> {
    validate_letters_only(value, "name", "Name should contains only letters")
}

/// Surname: não pode ser vazio, apenas letras.
pub fn validate_surname(value: &str) -> Result<(), AppError> {
    validate_letters_only(value, "surname", "Surname should contains only letters")
}

/// Email: gramática padrão de endereço (um único `@`, domínio com ponto).
pub fn validate_email(value: &str) -> Result<(), AppError> {
    match email_grammar_violation(value) {
        Some(reason) => Err(AppError::Invalid(vec![FieldViolation::invalid_email(
            value, reason,
        )])),
        None => Ok(()),
    }
}

/// Partial update: exige pelo menos um campo; valida só os campos presentes.
pub fn validate_update_payload(body: &UpdateUserRequest) -> Result<(), AppError> {
    if body.is_empty() {
        return Err(AppError::Validation(
            "At least one parameter for user update info should be provided".to_string(),
        ));
    }
    if let Some(name) = &body.name {
        validate_name(name)?;
    }
    if let Some(surname) = &body.surname {
        validate_surname(surname)?;
    }
    if let Some(email) = &body.email {
        validate_email(email)?;
    }
    Ok(())
}

// O comprimento é verificado primeiro: string vazia é "too short",
// nunca "only letters".
fn validate_letters_only(value: &str, field: &str, message: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::Invalid(vec![FieldViolation::string_too_short(
            field, value,
        )]));
    }
    if !value.chars().all(char::is_alphabetic) {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

// Checagens em estágios; a primeira razão violada é reportada.
fn email_grammar_violation(value: &str) -> Option<&'static str> {
    let parts: Vec<&str> = value.split('@').collect();
    if parts.len() != 2 {
        return Some("The email address is not valid. It must have exactly one @-sign.");
    }
    if parts[0].is_empty() {
        return Some("There must be something before the @-sign.");
    }
    if parts[1].is_empty() {
        return Some("There must be something after the @-sign.");
    }
    if !parts[1].contains('.') {
        return Some("The part after the @-sign is not valid. It should have a period.");
    }
    None
}
