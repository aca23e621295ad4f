//! Employee entity.

use crate::{CacheEntity, EmployeeId, Salary};
use serde::{Deserialize, Serialize};

/// An employee record as persisted by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Employee {
    /// Identity assigned by the repository.
    pub id: EmployeeId,

    /// Full name.
    pub name: String,

    /// Job title.
    pub position: String,

    /// Annual salary.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "1200.50"))]
    pub salary: Salary,
}

impl Employee {
    /// Creates an employee with a known identity.
    #[must_use]
    pub fn new(id: EmployeeId, name: impl Into<String>, position: impl Into<String>, salary: Salary) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
            salary,
        }
    }

    /// Overwrites the mutable fields with those of `changes`.
    ///
    /// Identity is never touched.
    pub fn apply(&mut self, changes: &NewEmployee) {
        self.name.clone_from(&changes.name);
        self.position.clone_from(&changes.position);
        self.salary.clone_from(&changes.salary);
    }
}

impl CacheEntity for Employee {
    const KIND: &'static str = "employee";
}

/// Employee payload before the repository has assigned (or confirmed) an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Requested identity, if any.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub position: String,
    pub salary: Salary,
}

impl NewEmployee {
    /// Builds the persisted form once an identity is known.
    #[must_use]
    pub fn with_id(&self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name.clone(),
            position: self.position.clone(),
            salary: self.salary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_identity() {
        let mut employee = Employee::new(EmployeeId::new(3), "Asha", "Engineer", Salary::from(1000));
        let changes = NewEmployee {
            id: Some(EmployeeId::new(99)),
            name: "Asha K".to_string(),
            position: "Lead".to_string(),
            salary: "2000.75".parse().unwrap(),
        };

        employee.apply(&changes);

        assert_eq!(employee.id, EmployeeId::new(3));
        assert_eq!(employee.name, "Asha K");
        assert_eq!(employee.position, "Lead");
        assert_eq!(employee.salary.to_string(), "2000.75");
    }

    #[test]
    fn test_with_id() {
        let draft = NewEmployee {
            id: None,
            name: "Ravi".to_string(),
            position: "Clerk".to_string(),
            salary: "500.5".parse().unwrap(),
        };
        let employee = draft.with_id(EmployeeId::new(11));
        assert_eq!(employee.salary, Salary::try_from(500.5).unwrap());
        assert_eq!(employee.id, EmployeeId::new(11));
    }
}
