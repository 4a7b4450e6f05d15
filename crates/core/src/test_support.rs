//! In-memory repositories and sample records shared by service tests.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::alerts::{Alert, AlertRepositoryTrait, NewAlert};
use crate::errors::{Error, Result};
use crate::expenses::{CategoryTag, Expense, ExpenseRepositoryTrait, NewExpense};
use crate::professionals::{NewProfessional, Professional, ProfessionalRepositoryTrait};
use crate::projects::{
    Location, NewProject, Project, ProjectDeletion, ProjectRepositoryTrait, ProjectType,
};
use crate::session::SessionRepositoryTrait;

pub fn sample_project(id: &str, owner_id: &str) -> Project {
    Project {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: format!("Obra {}", id),
        project_type: ProjectType::Renovation,
        area: dec!(100),
        location: Location {
            state: "MG".to_string(),
            city: "Belo Horizonte".to_string(),
            neighborhood: None,
        },
        budget: None,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 20),
        created_at: None,
    }
}

pub fn sample_expense(id: &str, project_id: &str, amount: Decimal, category: CategoryTag) -> Expense {
    Expense {
        id: id.to_string(),
        project_id: project_id.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 15),
        amount,
        category,
        description: None,
        payment_method: None,
        professional_id: None,
        supplier: None,
        notes: None,
        attachment: None,
    }
}

pub fn sample_professional(id: &str, project_id: &str, name: &str) -> Professional {
    Professional {
        id: id.to_string(),
        project_id: project_id.to_string(),
        name: name.to_string(),
        role: "Pedreiro".to_string(),
        phone: None,
        notes: None,
        expected_value: None,
        contract: None,
    }
}

fn new_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[derive(Default)]
pub struct InMemoryRepositories {
    projects: RwLock<Vec<Project>>,
    expenses: RwLock<Vec<Expense>>,
    professionals: RwLock<Vec<Professional>>,
    alerts: RwLock<Vec<Alert>>,
    active_project: RwLock<Option<String>>,
}

impl InMemoryRepositories {
    pub fn insert_project(&self, project: Project) {
        self.projects.write().unwrap().push(project);
    }

    pub fn insert_expense(&self, expense: Expense) {
        self.expenses.write().unwrap().push(expense);
    }

    pub fn insert_professional(&self, professional: Professional) {
        self.professionals.write().unwrap().push(professional);
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().unwrap().clone()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.expenses.read().unwrap().clone()
    }

    pub fn professional(&self, id: &str) -> Option<Professional> {
        self.professionals
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn active_project_id(&self) -> Option<String> {
        self.active_project.read().unwrap().clone()
    }
}

fn replace<T: Clone>(items: &RwLock<Vec<T>>, item: T, same: impl Fn(&T) -> bool, what: &str) -> Result<T> {
    let mut items = items.write().unwrap();
    let slot = items
        .iter_mut()
        .find(|existing| same(existing))
        .ok_or_else(|| Error::not_found(what.to_string()))?;
    *slot = item.clone();
    Ok(item)
}

fn remove<T>(items: &RwLock<Vec<T>>, matches: impl Fn(&T) -> bool) -> usize {
    let mut items = items.write().unwrap();
    let before = items.len();
    items.retain(|item| !matches(item));
    before - items.len()
}

#[async_trait]
impl ProjectRepositoryTrait for InMemoryRepositories {
    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Project {}", project_id)))
    }

    fn get_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects())
    }

    fn get_projects_by_owner(&self, owner_id: &str) -> Result<Vec<Project>> {
        Ok(self
            .projects()
            .into_iter()
            .filter(|p| p.owner_id == owner_id)
            .collect())
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let id = new_id(new_project.id.clone());
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let project = new_project.into_project(id, created_at);
        self.insert_project(project.clone());
        Ok(project)
    }

    async fn update_project(&self, project: Project) -> Result<Project> {
        let id = project.id.clone();
        replace(&self.projects, project, |p| p.id == id, "project")
    }

    async fn delete_project(&self, project_id: &str) -> Result<ProjectDeletion> {
        let mut active = self.active_project.write().unwrap();
        let active_pointer_cleared = active.as_deref() == Some(project_id);
        if active_pointer_cleared {
            *active = None;
        }
        Ok(ProjectDeletion {
            projects_removed: remove(&self.projects, |p| p.id == project_id),
            expenses_removed: remove(&self.expenses, |e| e.project_id == project_id),
            professionals_removed: remove(&self.professionals, |p| p.project_id == project_id),
            alerts_removed: remove(&self.alerts, |a| a.project_id == project_id),
            active_pointer_cleared,
        })
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryRepositories {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.expenses()
            .into_iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| Error::not_found(format!("Expense {}", expense_id)))
    }

    fn get_expenses_by_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        Ok(self
            .expenses()
            .into_iter()
            .filter(|e| e.project_id == project_id)
            .collect())
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        let id = new_id(new_expense.id.clone());
        let expense = new_expense.into_expense(id);
        self.insert_expense(expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        let id = expense.id.clone();
        replace(&self.expenses, expense, |e| e.id == id, "expense")
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        Ok(remove(&self.expenses, |e| e.id == expense_id))
    }
}

#[async_trait]
impl ProfessionalRepositoryTrait for InMemoryRepositories {
    fn get_professional(&self, professional_id: &str) -> Result<Professional> {
        self.professional(professional_id)
            .ok_or_else(|| Error::not_found(format!("Professional {}", professional_id)))
    }

    fn get_professionals_by_project(&self, project_id: &str) -> Result<Vec<Professional>> {
        Ok(self
            .professionals
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_professional(&self, new_professional: NewProfessional) -> Result<Professional> {
        let id = new_id(new_professional.id.clone());
        let professional = new_professional.into_professional(id);
        self.insert_professional(professional.clone());
        Ok(professional)
    }

    async fn update_professional(&self, professional: Professional) -> Result<Professional> {
        let id = professional.id.clone();
        replace(&self.professionals, professional, |p| p.id == id, "professional")
    }

    async fn delete_professional(&self, professional_id: &str) -> Result<usize> {
        Ok(remove(&self.professionals, |p| p.id == professional_id))
    }
}

#[async_trait]
impl AlertRepositoryTrait for InMemoryRepositories {
    fn get_alert(&self, alert_id: &str) -> Result<Alert> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == alert_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Alert {}", alert_id)))
    }

    fn get_alerts_by_project(&self, project_id: &str) -> Result<Vec<Alert>> {
        Ok(self
            .alerts
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert> {
        let id = new_id(new_alert.id.clone());
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let alert = new_alert.into_alert(id, created_at);
        self.alerts.write().unwrap().push(alert.clone());
        Ok(alert)
    }

    async fn update_alert(&self, alert: Alert) -> Result<Alert> {
        let id = alert.id.clone();
        replace(&self.alerts, alert, |a| a.id == id, "alert")
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<usize> {
        Ok(remove(&self.alerts, |a| a.id == alert_id))
    }
}

#[async_trait]
impl SessionRepositoryTrait for InMemoryRepositories {
    fn get_active_project_id(&self) -> Result<Option<String>> {
        Ok(self.active_project_id())
    }

    async fn set_active_project_id(&self, project_id: Option<String>) -> Result<()> {
        *self.active_project.write().unwrap() = project_id;
        Ok(())
    }
}
