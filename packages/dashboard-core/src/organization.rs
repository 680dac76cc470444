//! Organization chart metrics: head counts and budget utilization.

use crate::config::OrganizationConfig;
use crate::types::collect_by_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub status: String,
    /// Percent complete
    pub completion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub team_id: String,
    pub members: Vec<Employee>,
    pub budget: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub dept_id: String,
    pub name: String,
    #[serde(default)]
    pub head_count: u32,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub departments: Vec<Department>,
}

/// Derived figures for one team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMetrics {
    pub team_id: String,
    pub member_count: usize,
    pub budget: f64,
    /// Budget as a percentage of the budget cap
    pub budget_utilization: f64,
}

/// Derived figures for one department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentMetrics {
    pub dept_id: String,
    pub name: String,
    /// Members across all teams
    pub member_count: usize,
    pub total_budget: f64,
    /// Summed team budgets as a percentage of the budget cap
    pub budget_utilization: f64,
    pub first_team_id: Option<String>,
    pub teams: Vec<TeamMetrics>,
}

/// Budget as a percentage of the cap.
pub fn budget_utilization(budget: f64, config: &OrganizationConfig) -> f64 {
    budget / config.budget_cap * 100.0
}

impl TeamMetrics {
    pub fn calculate(team: &Team, config: &OrganizationConfig) -> Self {
        Self {
            team_id: team.team_id.clone(),
            member_count: team.members.len(),
            budget: team.budget,
            budget_utilization: budget_utilization(team.budget, config),
        }
    }
}

impl DepartmentMetrics {
    pub fn calculate(dept: &Department, config: &OrganizationConfig) -> Self {
        let teams: Vec<TeamMetrics> = dept
            .teams
            .iter()
            .map(|t| TeamMetrics::calculate(t, config))
            .collect();
        let total_budget: f64 = teams.iter().map(|t| t.budget).sum();

        Self {
            dept_id: dept.dept_id.clone(),
            name: dept.name.clone(),
            member_count: teams.iter().map(|t| t.member_count).sum(),
            total_budget,
            budget_utilization: budget_utilization(total_budget, config),
            first_team_id: dept.teams.first().map(|t| t.team_id.clone()),
            teams,
        }
    }
}

/// Calculate metrics for every department, keyed by department id.
pub fn evaluate_organization(
    organization: &Organization,
    config: &OrganizationConfig,
) -> BTreeMap<String, DepartmentMetrics> {
    let metrics = collect_by_id(
        organization
            .departments
            .iter()
            .map(|d| (d.dept_id.clone(), DepartmentMetrics::calculate(d, config))),
        "department",
    );

    tracing::debug!(departments = metrics.len(), "Evaluated organization");
    metrics
}
