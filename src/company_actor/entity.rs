use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Company, CompanyCreate, CompanyPatch};
use super::error::CompanyError;

fn checked_name(name: String) -> Result<String, CompanyError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CompanyError::ValidationError("Company name required".to_string()));
    }
    Ok(name)
}

impl Entity for Company {
    type Id = String;
    type CreateParams = CompanyCreate;
    type Patch = CompanyPatch;
    type Action = ();
    type ActionResult = ();
    type Error = CompanyError;

    const KIND: &'static str = "company";

    fn id(&self) -> &String { &self.id }

    fn from_create_params(id: String, params: CompanyCreate) -> Result<Self, CompanyError> {
        Ok(Self {
            id,
            name: checked_name(params.name)?,
            industry: params.industry.filter(|industry| !industry.trim().is_empty()),
            created_at: Utc::now(),
        })
    }

    /// A company is its own tenant.
    fn tenant_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn conflicts_with(&self, existing: &Self) -> Option<String> {
        (self.name.to_lowercase() == existing.name.to_lowercase()).then(|| self.name.clone())
    }

    fn on_update(&mut self, patch: CompanyPatch) -> Result<(), CompanyError> {
        if let Some(name) = patch.name {
            self.name = checked_name(name)?;
        }
        if let Some(industry) = patch.industry {
            self.industry = Some(industry);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), CompanyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(name: &str) -> CompanyCreate {
        CompanyCreate { name: name.to_string(), industry: Some("  ".to_string()) }
    }

    #[test]
    fn names_are_trimmed_and_required() {
        let company = Company::from_create_params("company_1".into(), params("  Acme Supply ")).unwrap();
        assert_eq!(company.name, "Acme Supply");
        assert_eq!(company.industry, None);

        let err = Company::from_create_params("company_2".into(), params("   ")).unwrap_err();
        assert!(matches!(err, CompanyError::ValidationError(_)));
    }

    #[test]
    fn names_clash_case_insensitively() {
        let a = Company::from_create_params("company_1".into(), params("Acme")).unwrap();
        let b = Company::from_create_params("company_2".into(), params("ACME")).unwrap();
        let c = Company::from_create_params("company_3".into(), params("Globex")).unwrap();
        assert_eq!(b.conflicts_with(&a), Some("ACME".to_string()));
        assert_eq!(c.conflicts_with(&a), None);
    }

    #[test]
    fn non_ascii_names_clash_case_insensitively() {
        let a = Company::from_create_params("company_1".into(), params("Über Foods")).unwrap();
        let b = Company::from_create_params("company_2".into(), params("ÜBER FOODS")).unwrap();
        assert_eq!(b.conflicts_with(&a), Some("ÜBER FOODS".to_string()));
    }

    #[test]
    fn rename_keeps_name_rules() {
        let mut company = Company::from_create_params("company_1".into(), params("Acme")).unwrap();
        let err = company
            .on_update(CompanyPatch { name: Some("  ".into()), industry: None })
            .unwrap_err();
        assert!(matches!(err, CompanyError::ValidationError(_)));

        company
            .on_update(CompanyPatch { name: Some(" Acme Wholesale ".into()), industry: Some("Food".into()) })
            .unwrap();
        assert_eq!(company.name, "Acme Wholesale");
        assert_eq!(company.industry.as_deref(), Some("Food"));
    }
}
