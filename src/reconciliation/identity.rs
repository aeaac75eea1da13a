//! Cross-document employee identity resolution.
//!
//! Names are the only identifier every document carries, so matching starts
//! from a normalized name and falls back to resident IDs and hire dates when
//! several records share a name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    CanonicalEmployee, EmploymentContract, MatchStatistics, WageRecord, parse_document_date,
};

use super::resident_id::{age_from_resident_id, resident_ids_match};

/// Reduces a name to Hangul syllables, Hangul jamo and Latin letters, with
/// whitespace runs collapsed to one space.
///
/// Joins across every component depend on this exact reduction.
///
/// # Examples
///
/// ```
/// use subsidy_engine::reconciliation::normalize_name;
///
/// assert_eq!(normalize_name(" 김 민준(1) "), "김 민준");
/// assert_eq!(normalize_name("이서연*"), "이서연");
/// assert_eq!(normalize_name("John   Smith"), "John Smith");
/// ```
pub fn normalize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|&c| is_name_char(c) || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{AC00}'..='\u{D7A3}').contains(&c)
        || ('\u{1100}'..='\u{11FF}').contains(&c)
        || ('\u{3131}'..='\u{3163}').contains(&c)
}

/// True when two names refer to the same person.
///
/// Normalized forms must be equal, or one must contain the other with a
/// length difference of at most one character (a stray OCR artifact).
///
/// ```
/// use subsidy_engine::reconciliation::names_match;
///
/// assert!(names_match("김민준", "김민준*"));
/// assert!(names_match("김민준", "김민준님"));
/// assert!(!names_match("김민", "김민준님"));
/// ```
pub fn names_match(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    let b = normalize_name(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let (longer, shorter) = if len_a >= len_b { (&a, &b) } else { (&b, &a) };
    longer.contains(shorter.as_str()) && len_a.abs_diff(len_b) <= 1
}

/// How a wage ledger row found its contract by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatchKind {
    /// Normalized names were identical.
    Exact,
    /// Names matched within the one-character tolerance.
    Fuzzy,
}

/// How a choice between several same-named contracts was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disambiguation {
    /// Resident IDs agreed.
    ResidentId,
    /// Contract start date closest to the hire date.
    HireDateProximity,
    /// First candidate in document order.
    InputOrder,
}

/// Result of matching one wage ledger row against the contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMatch {
    /// Name on the wage ledger.
    pub employee_name: String,
    /// Index of the chosen contract in the candidate list.
    pub contract_index: Option<usize>,
    /// How the name matched.
    pub name_match: Option<NameMatchKind>,
    /// Tie-break used when several candidates shared the name.
    pub disambiguation: Option<Disambiguation>,
    /// Number of candidates that matched by name.
    pub candidate_count: usize,
}

impl EmployeeMatch {
    /// Returns true when a contract was found.
    pub fn is_matched(&self) -> bool {
        self.contract_index.is_some()
    }

    fn unmatched(name: &str) -> Self {
        Self {
            employee_name: name.to_string(),
            contract_index: None,
            name_match: None,
            disambiguation: None,
            candidate_count: 0,
        }
    }
}

/// Finds the contract belonging to a wage ledger row.
///
/// Exact normalized-name hits are preferred over fuzzy ones. When several
/// contracts share the name, the resident ID decides first (it needs an ID
/// on the ledger row and on the contract), then the contract start date
/// closest to the hire date, then document order.
pub fn match_employee_across_documents(
    wage_employee: &WageRecord,
    contract_candidates: &[EmploymentContract],
) -> EmployeeMatch {
    let candidates: Vec<(usize, &EmploymentContract)> =
        contract_candidates.iter().enumerate().collect();
    match_among(wage_employee, &candidates)
}

/// Same as [`match_employee_across_documents`] over an indexed subset.
pub(crate) fn match_among(
    wage_employee: &WageRecord,
    candidates: &[(usize, &EmploymentContract)],
) -> EmployeeMatch {
    let key = normalize_name(&wage_employee.name);
    if key.is_empty() {
        return EmployeeMatch::unmatched(&wage_employee.name);
    }

    let exact: Vec<(usize, &EmploymentContract)> = candidates
        .iter()
        .filter(|(_, c)| normalize_name(&c.employee_name) == key)
        .copied()
        .collect();

    let (kind, pool) = if !exact.is_empty() {
        (NameMatchKind::Exact, exact)
    } else {
        let fuzzy: Vec<(usize, &EmploymentContract)> = candidates
            .iter()
            .filter(|(_, c)| names_match(&key, &c.employee_name))
            .copied()
            .collect();
        if fuzzy.is_empty() {
            return EmployeeMatch::unmatched(&wage_employee.name);
        }
        (NameMatchKind::Fuzzy, fuzzy)
    };

    let (index, disambiguation) = if pool.len() == 1 {
        (pool[0].0, None)
    } else {
        let (index, how) = disambiguate(wage_employee, &pool);
        (index, Some(how))
    };

    EmployeeMatch {
        employee_name: wage_employee.name.clone(),
        contract_index: Some(index),
        name_match: Some(kind),
        disambiguation,
        candidate_count: pool.len(),
    }
}

// A resident ID on only one side cannot confirm a partial match, so the ID
// step keys off the ledger row; a contract-only ID falls through to the
// hire-date step just as an unsupplied one would.
fn disambiguate(
    wage_employee: &WageRecord,
    pool: &[(usize, &EmploymentContract)],
) -> (usize, Disambiguation) {
    if let Some(wage_id) = wage_employee.resident_id.as_deref() {
        let hit = pool.iter().find(|(_, c)| {
            c.resident_id
                .as_deref()
                .is_some_and(|id| resident_ids_match(wage_id, id))
        });
        if let Some((index, _)) = hit {
            return (*index, Disambiguation::ResidentId);
        }
    }

    if let Some(hire) = wage_employee.hire_date.as_deref().and_then(parse_document_date) {
        let closest = pool
            .iter()
            .filter_map(|(index, c)| {
                let start = c.contract_start_date.as_deref().and_then(parse_document_date)?;
                Some((*index, day_distance(hire, start)))
            })
            .min_by_key(|(_, distance)| *distance);
        if let Some((index, _)) = closest {
            return (index, Disambiguation::HireDateProximity);
        }
    }

    (pool[0].0, Disambiguation::InputOrder)
}

fn day_distance(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Matches every wage ledger row and derives the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMatchReport {
    /// One entry per wage ledger row, in ledger order.
    pub matches: Vec<EmployeeMatch>,
    /// Aggregate statistics.
    pub statistics: MatchStatistics,
}

/// Matches each wage ledger row against all contracts.
///
/// Youth and senior counts use the wage ledger resident ID, falling back to
/// the matched contract's resident ID or written age.
pub fn match_wage_ledger_to_contracts(
    wage_records: &[WageRecord],
    contracts: &[EmploymentContract],
    today: NaiveDate,
) -> IdentityMatchReport {
    let matches: Vec<EmployeeMatch> = wage_records
        .iter()
        .map(|w| match_employee_across_documents(w, contracts))
        .collect();

    let total = matches.len() as u32;
    let matched_count = matches.iter().filter(|m| m.is_matched()).count() as u32;
    let match_rate = if total == 0 {
        0
    } else {
        ((matched_count as f64 / total as f64) * 100.0).round() as u32
    };

    let mut youth_count = 0;
    let mut senior_count = 0;
    for (wage, m) in wage_records.iter().zip(&matches) {
        let Some(index) = m.contract_index else {
            continue;
        };
        let contract = &contracts[index];
        let age = wage
            .resident_id
            .as_deref()
            .and_then(|id| age_from_resident_id(id, today))
            .or_else(|| {
                contract
                    .resident_id
                    .as_deref()
                    .and_then(|id| age_from_resident_id(id, today))
            })
            .or(contract.age);
        let (youth, senior) = CanonicalEmployee::age_flags(age);
        youth_count += u32::from(youth);
        senior_count += u32::from(senior);
    }

    IdentityMatchReport {
        matches,
        statistics: MatchStatistics {
            total,
            matched_count,
            unmatched_count: total - matched_count,
            match_rate,
            youth_count,
            senior_count,
        },
    }
}
