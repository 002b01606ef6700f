use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, RuntimeErr,
    Set,
};
use tracing::debug;

use models::student;

use crate::student::domain::Student;
use crate::student::repository::{RepoError, StudentRepository};

pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn columns(s: &Student) -> student::ActiveModel {
    student::ActiveModel {
        id: NotSet,
        username: Set(s.username.clone()),
        mail: Set(s.mail.clone()),
        phone_number: Set(s.phone_number.clone()),
        hobby: Set(s.hobby.clone()),
        skillsets: Set(s.skillsets.clone()),
    }
}

// postgres undefined_table
const PG_UNDEFINED_TABLE: &str = "42P01";
// sqlite reports every schema error as SQLITE_ERROR (1)
const SQLITE_ERROR: &str = "1";

fn is_missing_table(e: &DbErr) -> bool {
    let runtime = match e {
        DbErr::Query(r) | DbErr::Exec(r) => r,
        _ => return false,
    };
    let RuntimeErr::SqlxError(sqlx_err) = runtime else { return false };
    let Some(db_err) = sqlx_err.as_database_error() else { return false };
    match db_err.code().as_deref() {
        Some(PG_UNDEFINED_TABLE) => true,
        Some(SQLITE_ERROR) => db_err.message().starts_with("no such table"),
        _ => false,
    }
}

fn store_error(e: DbErr) -> RepoError {
    let msg = e.to_string();
    if is_missing_table(&e) {
        RepoError::Unavailable(msg)
    } else {
        RepoError::Backend(msg)
    }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, RepoError> {
        let rows = student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, RepoError> {
        let found = student::Entity::find_by_id(id).one(&self.db).await.map_err(store_error)?;
        Ok(found.map(Student::from))
    }

    async fn insert(&self, student: Student) -> Result<Student, RepoError> {
        let created = columns(&student).insert(&self.db).await.map_err(store_error)?;
        Ok(Student::from(created))
    }

    async fn replace(&self, s: &Student) -> Result<(), RepoError> {
        let res = student::Entity::update_many()
            .set(columns(s))
            .filter(student::Column::Id.eq(s.id))
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        debug!(id = s.id, rows_affected = res.rows_affected, "student_replace");
        if res.rows_affected == 0 {
            return Err(RepoError::Conflict);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let res = student::Entity::delete_by_id(id).exec(&self.db).await.map_err(store_error)?;
        Ok(res.rows_affected > 0)
    }
}
