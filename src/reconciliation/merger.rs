//! Reconciliation of per-document employee rows into canonical employees.
//!
//! Employees are keyed by normalized name; same-named people collapse into
//! one record. Each canonical field is filled by a fixed source priority:
//!
//! | Field | Priority |
//! |---|---|
//! | name, resident ID | wage ledger, insurance roster, contract |
//! | age, birth year | wage ledger, contract |
//! | hire date | wage ledger, insurance enrollment, contract start |
//! | wage, hours, work type | wage ledger, contract |
//! | employment insurance | roster flag if a roster was supplied, else assumed unless part-time |
//! | current employment | false once any source reports a departure |

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{
    CanonicalEmployee, DocumentType, EmploymentContract, InsuranceRecord, InsuranceRoster,
    TerminationInfo, WageLedger, WageRecord, WorkType, completed_months, parse_document_date,
};

use super::identity::{match_among, names_match, normalize_name};
use super::resident_id::ResidentId;

#[derive(Debug, Default)]
struct Draft<'a> {
    key: String,
    wage: Option<&'a WageRecord>,
    insurance: Option<&'a InsuranceRecord>,
    contract: Option<&'a EmploymentContract>,
    departed: bool,
    termination: Option<TerminationInfo>,
}

impl<'a> Draft<'a> {
    fn new(key: String) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    fn note_departure(&mut self, date: Option<&str>, reason: Option<&str>) {
        self.departed = true;
        if self.termination.is_none() {
            self.termination = Some(TerminationInfo {
                date: date.and_then(parse_document_date),
                reason: reason.map(str::to_string),
            });
        }
    }
}

struct Drafts<'a> {
    drafts: Vec<Draft<'a>>,
    by_key: HashMap<String, usize>,
}

impl<'a> Drafts<'a> {
    fn new() -> Self {
        Self {
            drafts: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Exact key first, then the first existing key within name tolerance.
    fn resolve(&self, key: &str) -> Option<usize> {
        if let Some(&index) = self.by_key.get(key) {
            return Some(index);
        }
        self.drafts.iter().position(|d| names_match(&d.key, key))
    }

    fn resolve_or_insert(&mut self, key: String) -> usize {
        if let Some(index) = self.resolve(&key) {
            return index;
        }
        let index = self.drafts.len();
        self.by_key.insert(key.clone(), index);
        self.drafts.push(Draft::new(key));
        index
    }
}

/// Merges whichever documents were supplied into one record per person.
///
/// Records whose name normalizes to nothing are skipped. With no documents
/// the result is empty; the merger never invents an employee.
pub fn merge_employee_data(
    wage_ledger: Option<&WageLedger>,
    insurance_roster: Option<&InsuranceRoster>,
    contracts: Option<&[EmploymentContract]>,
    today: NaiveDate,
) -> Vec<CanonicalEmployee> {
    let mut drafts = Drafts::new();

    if let Some(ledger) = wage_ledger {
        for record in &ledger.employees {
            let key = normalize_name(&record.name);
            if key.is_empty() {
                continue;
            }
            let index = match drafts.by_key.get(&key) {
                Some(&index) => index,
                None => {
                    let index = drafts.drafts.len();
                    drafts.by_key.insert(key.clone(), index);
                    drafts.drafts.push(Draft::new(key));
                    index
                }
            };
            let draft = &mut drafts.drafts[index];
            if draft.wage.is_none() {
                draft.wage = Some(record);
            }
            let left = record.is_current_employee == Some(false)
                || record
                    .termination_date
                    .as_deref()
                    .is_some_and(|d| !d.trim().is_empty());
            if left {
                draft.note_departure(
                    record.termination_date.as_deref(),
                    record.termination_reason.as_deref(),
                );
            }
        }
    }

    if let Some(roster) = insurance_roster {
        for record in &roster.employees {
            let key = normalize_name(&record.name);
            if key.is_empty() {
                continue;
            }
            let index = drafts.resolve_or_insert(key);
            let draft = &mut drafts.drafts[index];
            if draft.insurance.is_none() {
                draft.insurance = Some(record);
            }
            if record
                .loss_date
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
            {
                draft.note_departure(
                    record.loss_date.as_deref(),
                    record.loss_reason_code.as_deref(),
                );
            }
        }
    }

    if let Some(contracts) = contracts {
        attach_contracts(&mut drafts, contracts);
    }

    let roster_supplied = insurance_roster.is_some();
    let employees: Vec<CanonicalEmployee> = drafts
        .drafts
        .into_iter()
        .map(|draft| finish(draft, roster_supplied, today))
        .collect();

    debug!(
        employees = employees.len(),
        roster_supplied, "Merged employee records"
    );
    employees
}

/// Wage ledger employees pick their contract through the identity matcher;
/// remaining contracts join by name or start a new record.
fn attach_contracts<'a>(drafts: &mut Drafts<'a>, contracts: &'a [EmploymentContract]) {
    let mut used = vec![false; contracts.len()];

    for draft in drafts.drafts.iter_mut() {
        let Some(wage) = draft.wage else {
            continue;
        };
        let available: Vec<(usize, &EmploymentContract)> = contracts
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .collect();
        let found = match_among(wage, &available);
        if let Some(index) = found.contract_index {
            debug!(
                employee = %draft.key,
                contract_index = index,
                name_match = ?found.name_match,
                disambiguation = ?found.disambiguation,
                "Matched contract to wage ledger employee"
            );
            used[index] = true;
            draft.contract = Some(&contracts[index]);
        }
    }

    for (index, contract) in contracts.iter().enumerate() {
        if used[index] {
            continue;
        }
        let key = normalize_name(&contract.employee_name);
        if key.is_empty() {
            continue;
        }
        let target = drafts.resolve_or_insert(key);
        let draft = &mut drafts.drafts[target];
        if draft.contract.is_none() {
            draft.contract = Some(contract);
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn age_from(resident_id: Option<&str>, today: NaiveDate) -> Option<(u32, i32)> {
    let id = ResidentId::parse(resident_id?)?;
    let birth = id.birth_date(today)?;
    Some((id.age(today)?, birth.year()))
}

fn finish(draft: Draft<'_>, roster_supplied: bool, today: NaiveDate) -> CanonicalEmployee {
    let Draft {
        key,
        wage,
        insurance,
        contract,
        departed,
        termination,
    } = draft;

    let name = wage
        .map(|w| w.name.trim().to_string())
        .or_else(|| insurance.map(|i| i.name.trim().to_string()))
        .or_else(|| contract.map(|c| c.employee_name.trim().to_string()))
        .unwrap_or_else(|| key.clone());

    let resident_id = wage
        .and_then(|w| non_empty(w.resident_id.as_ref()))
        .or_else(|| insurance.and_then(|i| non_empty(i.resident_id.as_ref())))
        .or_else(|| contract.and_then(|c| non_empty(c.resident_id.as_ref())))
        .map(str::to_string);

    let age_and_year = wage
        .and_then(|w| age_from(w.resident_id.as_deref(), today))
        .or_else(|| {
            let contract = contract?;
            age_from(contract.resident_id.as_deref(), today)
                .or_else(|| contract.age.map(|age| (age, today.year() - age as i32)))
        });
    let age = age_and_year.map(|(age, _)| age);
    let birth_year = age_and_year.map(|(_, year)| year);
    let (is_youth, is_senior) = CanonicalEmployee::age_flags(age);

    let hire_date_raw = wage
        .and_then(|w| non_empty(w.hire_date.as_ref()))
        .or_else(|| insurance.and_then(|i| non_empty(i.enrollment_date.as_ref())))
        .or_else(|| contract.and_then(|c| non_empty(c.contract_start_date.as_ref())))
        .map(str::to_string);
    let hire_date = hire_date_raw.as_deref().and_then(parse_document_date);
    let employment_months = hire_date
        .map(|h| completed_months(h, today))
        .unwrap_or(0);

    let weekly_hours = wage
        .and_then(|w| w.weekly_hours)
        .or_else(|| contract.and_then(|c| c.weekly_hours));
    let monthly_salary = wage
        .and_then(|w| w.monthly_wage)
        .or_else(|| contract.and_then(|c| c.monthly_salary));
    let work_type = wage
        .and_then(|w| w.work_type)
        .or_else(|| contract.and_then(|c| c.work_type));

    let has_employment_insurance = if roster_supplied {
        insurance.is_some_and(|i| i.insurance.employment_insurance)
    } else {
        work_type != Some(WorkType::PartTime)
    };
    let insurance_detail = insurance
        .map(|i| i.insurance)
        .or_else(|| contract.and_then(|c| c.insurance));

    let mut sources = Vec::new();
    if wage.is_some() {
        sources.push(DocumentType::WageLedger);
    }
    if insurance.is_some() {
        sources.push(DocumentType::InsuranceRoster);
    }
    if contract.is_some() {
        sources.push(DocumentType::EmploymentContract);
    }

    CanonicalEmployee {
        name,
        name_key: key,
        resident_id,
        age,
        birth_year,
        is_youth,
        is_senior,
        hire_date,
        hire_date_raw,
        employment_months,
        weekly_hours,
        monthly_salary,
        has_employment_insurance,
        insurance: insurance_detail,
        work_type,
        is_current_employee: !departed,
        termination,
        sources,
    }
}
