use std::fmt;

use tracing::{debug, warn};
use validator::ValidateEmail;

use crate::employee::{next_id, Employee, EmployeeId};
use crate::error::ApiResult;

pub const FIX_FIELDS_MESSAGE: &str = "Please fix all the fields on the form and try again (zeros must also be replaced with values; empty fields are prohibited).";
pub const FILL_IN_MESSAGE: &str = "Fill in all the fields";
pub const POST_ERROR_MESSAGE: &str = "Server respond with error. Try later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Surname,
    Age,
    Salary,
    Position,
    Email,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Surname,
        Field::Age,
        Field::Salary,
        Field::Position,
        Field::Email,
    ];

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Surname => 1,
            Field::Age => 2,
            Field::Salary => 3,
            Field::Position => 4,
            Field::Email => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Surname => "Surname",
            Field::Age => "Age",
            Field::Salary => "Salary",
            Field::Position => "Position",
            Field::Email => "Email",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Age | Field::Salary)
    }

    /// Checks a raw input value against this field's rule.
    pub fn validate(self, value: &str) -> bool {
        match self {
            Field::Name | Field::Surname | Field::Position => !value.trim().is_empty(),
            Field::Age => parse_age(value).is_some(),
            Field::Salary => parse_salary(value).is_some(),
            Field::Email => is_valid_email(value),
        }
    }

    /// Whether the field holds something at all. A numeric field holding zero
    /// counts as empty.
    pub fn is_filled(self, value: &str) -> bool {
        let value = value.trim();
        if self.is_numeric() {
            matches!(value.parse::<f64>(), Ok(number) if number != 0.0 && !number.is_nan())
        } else {
            !value.is_empty()
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Email grammar check plus a required top-level domain, so `user@localhost`
/// is refused.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if !value.validate_email() {
        return false;
    }
    let domain = match value.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => return false,
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn parse_age(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

fn parse_salary(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|salary| salary.is_finite() && *salary > 0.0)
}

/// Raw text of the six inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    pub name: String,
    pub surname: String,
    pub age: String,
    pub salary: String,
    pub position: String,
    pub email: String,
}

impl FormDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::Age => &self.age,
            Field::Salary => &self.salary,
            Field::Position => &self.position,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Surname => &mut self.surname,
            Field::Age => &mut self.age,
            Field::Salary => &mut self.salary,
            Field::Position => &mut self.position,
            Field::Email => &mut self.email,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = FormDraft::default();
    }

    /// Builds the record to create, or `None` if any value does not pass its
    /// rule.
    pub fn to_employee(&self, id: EmployeeId) -> Option<Employee> {
        if !Field::ALL.iter().all(|field| field.validate(self.get(*field))) {
            return None;
        }
        Some(Employee {
            id,
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            age: parse_age(&self.age)?,
            salary: parse_salary(&self.salary)?,
            position: self.position.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMessage {
    FixFields,
    FillIn,
}

impl FormMessage {
    pub fn text(self) -> &'static str {
        match self {
            FormMessage::FixFields => FIX_FIELDS_MESSAGE,
            FormMessage::FillIn => FILL_IN_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the message is now shown.
    Rejected(FormMessage),
    /// The list has not been loaded yet.
    NotLoaded,
    /// A previous submission has not settled yet.
    InFlight,
    /// Send this record with `POST /employees`.
    Dispatch(Employee),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    draft: FormDraft,
    valid: [bool; 6],
    touched: [bool; 6],
    message: Option<FormMessage>,
    post_error: bool,
    submitting: bool,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        EmployeeForm {
            draft: FormDraft::default(),
            valid: [true; 6],
            touched: [false; 6],
            message: None,
            post_error: false,
            submitting: false,
        }
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        EmployeeForm::default()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    pub fn is_valid(&self, field: Field) -> bool {
        self.valid[field.index()]
    }

    pub fn message(&self) -> Option<FormMessage> {
        self.message
    }

    pub fn has_post_error(&self) -> bool {
        self.post_error
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Keystroke. Validity is left untouched until the next blur.
    pub fn input(&mut self, field: Field, value: String) {
        self.draft.set(field, value);
    }

    pub fn blur(&mut self, field: Field) {
        self.touched[field.index()] = true;
        self.check(field);
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    pub fn dismiss_post_error(&mut self) {
        self.post_error = false;
    }

    /// Runs the submit gates against the current draft. `employees` is the
    /// loaded list, if any; the new id is derived from its last element.
    pub fn submit(&mut self, employees: Option<&[Employee]>) -> SubmitOutcome {
        if self.submitting {
            debug!("submission already in flight");
            return SubmitOutcome::InFlight;
        }

        // flags of fields the user has touched or typed into are refreshed, so
        // an edit after the last blur cannot slip through
        for field in Field::ALL.iter() {
            let i = field.index();
            if self.touched[i] || !self.draft.get(*field).is_empty() {
                self.check(*field);
            }
        }

        if !self.valid.iter().all(|valid| *valid) {
            return self.reject(FormMessage::FixFields);
        }

        let all_filled = Field::ALL
            .iter()
            .all(|field| field.is_filled(self.draft.get(*field)));
        if !all_filled {
            return self.reject(FormMessage::FillIn);
        }

        let employees = match employees {
            Some(employees) => employees,
            None => return SubmitOutcome::NotLoaded,
        };
        let id = next_id(employees);

        let employee = match self.draft.to_employee(id) {
            Some(employee) => employee,
            None => return self.reject(FormMessage::FixFields),
        };

        self.message = None;
        self.submitting = true;
        debug!(id, "submitting new employee");
        SubmitOutcome::Dispatch(employee)
    }

    /// Settles a dispatched submission. The draft is cleared either way.
    pub fn finish_submit(&mut self, result: &ApiResult<()>) {
        if let Err(err) = result {
            warn!(error = %err, "creating employee failed");
            self.post_error = true;
        }
        self.draft.clear();
        self.valid = [true; 6];
        self.touched = [false; 6];
        self.submitting = false;
    }

    fn check(&mut self, field: Field) {
        self.valid[field.index()] = field.validate(self.draft.get(field));
    }

    fn reject(&mut self, message: FormMessage) -> SubmitOutcome {
        debug!(?message, "submission rejected");
        self.message = Some(message);
        SubmitOutcome::Rejected(message)
    }
}
