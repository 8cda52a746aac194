//! Student Record - the current student's identity and placement

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::{Error, Result};

/// Student identity plus academic placement.
///
/// Profile fields (`email`, `phone`, ...) are optional and omitted from the
/// stored document when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: String,
    name: String,
    roll_number: String,
    department: String,
    semester: u32,
    section: String,
    batch_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blood_group: Option<String>,
}

impl Student {
    /// Create a builder with the required identity fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> StudentBuilder {
        StudentBuilder::new(id, name)
    }

    /// Get the student ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the student's full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the roll number.
    #[must_use]
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    /// Get the department.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Get the current semester (1-based).
    #[must_use]
    pub const fn semester(&self) -> u32 {
        self.semester
    }

    /// Get the section.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Get the batch number.
    #[must_use]
    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    /// Get the profile image URI, if set.
    #[must_use]
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    /// Get the email address, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Get the phone number, if set.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Get the postal address, if set.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Get the date of birth as stored, if set.
    #[must_use]
    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    /// Get the blood group, if set.
    #[must_use]
    pub fn blood_group(&self) -> Option<&str> {
        self.blood_group.as_deref()
    }
}

impl Validate for Student {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("student id must not be empty".into()));
        }
        if self.semester == 0 {
            return Err(Error::InvalidInput(format!(
                "student {} has semester 0 (semesters start at 1)",
                self.id
            )));
        }
        Ok(())
    }
}

/// Builder for `Student`.
#[derive(Debug)]
pub struct StudentBuilder {
    student: Student,
}

impl StudentBuilder {
    /// Create a new builder with required fields. Semester defaults to 1.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            student: Student {
                id: id.into(),
                name: name.into(),
                roll_number: String::new(),
                department: String::new(),
                semester: 1,
                section: String::new(),
                batch_number: String::new(),
                profile_image: None,
                email: None,
                phone: None,
                address: None,
                date_of_birth: None,
                blood_group: None,
            },
        }
    }

    /// Set the roll number.
    #[must_use]
    pub fn roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.student.roll_number = roll_number.into();
        self
    }

    /// Set the department.
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.student.department = department.into();
        self
    }

    /// Set the current semester.
    #[must_use]
    pub const fn semester(mut self, semester: u32) -> Self {
        self.student.semester = semester;
        self
    }

    /// Set the section.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.student.section = section.into();
        self
    }

    /// Set the batch number.
    #[must_use]
    pub fn batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.student.batch_number = batch_number.into();
        self
    }

    /// Set the profile image URI.
    #[must_use]
    pub fn profile_image(mut self, uri: impl Into<String>) -> Self {
        self.student.profile_image = Some(uri.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.student.email = Some(email.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.student.phone = Some(phone.into());
        self
    }

    /// Set the postal address.
    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.student.address = Some(address.into());
        self
    }

    /// Set the date of birth.
    #[must_use]
    pub fn date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.student.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// Set the blood group.
    #[must_use]
    pub fn blood_group(mut self, blood_group: impl Into<String>) -> Self {
        self.student.blood_group = Some(blood_group.into());
        self
    }

    /// Build the `Student`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty id or semester 0.
    pub fn build(self) -> Result<Student> {
        self.student.validate()?;
        Ok(self.student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let student = Student::builder("s1", "Alex Johnson").build().unwrap();
        let json = serde_json::to_value(&student).unwrap();

        assert!(json.get("email").is_none());
        assert!(json.get("bloodGroup").is_none());
        assert_eq!(json["rollNumber"], "");
    }

    #[test]
    fn test_zero_semester_rejected() {
        assert!(Student::builder("s1", "Alex").semester(0).build().is_err());
    }
}
