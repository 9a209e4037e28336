//! Builders wiring the catalogue services onto the configured store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use coursehub::domain::ports::{
    CourseCatalogue, CourseRepository, LoginService, TeacherCatalogue, TeacherRepository,
};
use coursehub::domain::{
    CatalogueSeeder, CourseService, OperatorLoginService, TeacherService, UserId,
};
use coursehub::inbound::http::state::{HttpState, WriteAccess};
use coursehub::outbound::memory::InMemoryCatalogueStore;
use coursehub::outbound::persistence::{DbPool, DieselCourseRepository, DieselTeacherRepository};

use super::ServerConfig;

/// Session user id issued to the operator account.
const OPERATOR_USER_ID: Uuid = Uuid::from_u128(0x123e_4567_e89b_12d3_a456_4266_1417_4000);

/// Backing store for teachers and courses.
#[derive(Clone)]
pub enum CatalogueStore {
    /// Process-local maps; contents are lost on restart.
    Memory(InMemoryCatalogueStore),
    /// PostgreSQL through the shared pool.
    Postgres(DbPool),
}

impl Default for CatalogueStore {
    fn default() -> Self {
        Self::Memory(InMemoryCatalogueStore::new())
    }
}

/// Driving ports plus the seeder, sharing one pair of repositories.
#[derive(Clone)]
pub struct CatalogueServices {
    pub teachers: Arc<dyn TeacherCatalogue>,
    pub courses: Arc<dyn CourseCatalogue>,
    pub seeder: CatalogueSeeder,
}

fn build_services<T, C>(teacher_repo: Arc<T>, course_repo: Arc<C>) -> CatalogueServices
where
    T: TeacherRepository + 'static,
    C: CourseRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let teachers: Arc<dyn TeacherCatalogue> =
        Arc::new(TeacherService::new(teacher_repo.clone(), clock.clone()));
    let courses: Arc<dyn CourseCatalogue> = Arc::new(CourseService::new(
        course_repo,
        teacher_repo.clone(),
        clock,
    ));
    let seeder = CatalogueSeeder::new(teacher_repo, teachers.clone(), courses.clone());
    CatalogueServices {
        teachers,
        courses,
        seeder,
    }
}

impl CatalogueStore {
    /// Build the catalogue services over this store.
    pub fn services(&self) -> CatalogueServices {
        match self {
            Self::Memory(store) => {
                let store = Arc::new(store.clone());
                build_services(store.clone(), store)
            }
            Self::Postgres(pool) => build_services(
                Arc::new(DieselTeacherRepository::new(pool.clone())),
                Arc::new(DieselCourseRepository::new(pool.clone())),
            ),
        }
    }
}

/// Build the HTTP state from the configuration and catalogue services.
pub fn build_http_state(config: &ServerConfig, services: &CatalogueServices) -> HttpState {
    let (email, password) = &config.operator;
    let login: Arc<dyn LoginService> = Arc::new(OperatorLoginService::new(
        email,
        password,
        UserId::from_uuid(OPERATOR_USER_ID),
    ));
    HttpState::new(services.teachers.clone(), services.courses.clone(), login)
        .with_write_access(WriteAccess::from_flag(config.require_login_for_writes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub::domain::{NewTeacherRequest, TeacherSort};
    use coursehub::domain::LoginCredentials;
    use coursehub::inbound::http::session_config::SessionSettings;
    use rstest::rstest;

    fn config() -> ServerConfig {
        ServerConfig::new(
            SessionSettings::ephemeral(),
            "127.0.0.1:0".parse().expect("literal addr"),
        )
    }

    #[tokio::test]
    async fn memory_services_share_one_store() {
        let services = CatalogueStore::default().services();
        services
            .teachers
            .create_teacher(NewTeacherRequest {
                name: Some("Sarah Johnson".to_owned()),
                ..NewTeacherRequest::default()
            })
            .await
            .expect("teacher created");

        let listed = services
            .teachers
            .list_teachers(TeacherSort::default())
            .await
            .expect("teachers listed");
        assert_eq!(listed.len(), 1);
    }

    #[rstest]
    #[case(false, WriteAccess::Open)]
    #[case(true, WriteAccess::RequireSession)]
    fn write_access_follows_configuration(#[case] required: bool, #[case] expected: WriteAccess) {
        let config = config().with_login_for_writes(required);
        let state = build_http_state(&config, &CatalogueStore::default().services());
        assert_eq!(state.write_access, expected);
    }

    #[tokio::test]
    async fn operator_account_is_configurable() {
        let config = config().with_operator("ops@coach.io", "changeme");
        let state = build_http_state(&config, &CatalogueStore::default().services());

        let creds = LoginCredentials::try_from_parts("ops@coach.io", "changeme").expect("creds");
        let user = state.login.authenticate(&creds).await.expect("operator login");
        assert_eq!(user, UserId::from_uuid(OPERATOR_USER_ID));

        let default_creds =
            LoginCredentials::try_from_parts("admin@coach.io", "admin123").expect("creds");
        assert!(state.login.authenticate(&default_creds).await.is_err());
    }
}
