use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{VendoraError, VendoraResult};

/// Runs a model's validation rules and converts the outcome into the shared
/// error taxonomy, with every failed field reported at once.
pub fn validate_model<T: Validate>(model: &T) -> VendoraResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(VendoraError::invalid(field_errors(&errors))),
    }
}

/// Flattens `validator`'s nested error tree into a `field -> message` map.
/// Nested struct fields are dotted (`primary_contact.email`).
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    collect(errors, "", &mut map);
    map
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(error) = list.first() {
                    out.insert(path, message_for(error, field));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn message_for(error: &ValidationError, field: &str) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "range" => format!("Value out of range for field '{field}'"),
            "length" => format!("Length validation failed for field '{field}'"),
            "email" => "Invalid email format".to_string(),
            "required" => format!("Field '{field}' is required"),
            code => format!("Validation failed for field '{field}': {code}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendora_models::{ContactCard, SupplierDraft};

    fn draft() -> SupplierDraft {
        SupplierDraft {
            name: "Acme".to_string(),
            email: "sales@acme.com".to_string(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: None,
            zip: None,
            country: String::new(),
            category: "Parts".to_string(),
            status: "active".to_string(),
            rating: 0.0,
            total_orders: 0,
            total_value: 0.0,
            last_order: None,
            website: None,
            tax_id: None,
            payment_terms: "Net 30".to_string(),
            tags: Vec::new(),
            primary_contact: ContactCard {
                name: "Jane".to_string(),
                email: None,
                phone: None,
            },
            secondary_contact: None,
            technical_contact: None,
            parts_contact: None,
            billing_contact: None,
        }
    }

    #[test]
    fn valid_model_passes() {
        assert!(validate_model(&draft()).is_ok());
    }

    #[test]
    fn every_failed_field_is_reported() {
        let mut bad = draft();
        bad.name = String::new();
        bad.email = "nope".to_string();
        bad.status = "gone".to_string();

        let error = validate_model(&bad).expect_err("must fail");
        match error {
            VendoraError::Validation { errors } => {
                assert!(errors.contains_key("name"));
                assert!(errors.contains_key("email"));
                assert!(errors.contains_key("status"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_contact_errors_are_dotted() {
        let mut bad = draft();
        bad.primary_contact.email = Some("not an email".to_string());

        let error = validate_model(&bad).expect_err("must fail");
        match error {
            VendoraError::Validation { errors } => {
                assert!(errors.contains_key("primary_contact.email"), "{errors:?}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
