pub mod db;
pub mod student;

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, QueryOrder, Set};

    use crate::{db, student};

    fn row(username: &str) -> student::ActiveModel {
        student::ActiveModel {
            id: NotSet,
            username: Set(Some(username.to_string())),
            mail: Set(None),
            phone_number: Set(Some("555-0100".into())),
            hobby: Set(None),
            skillsets: Set(Some("rust,sql".into())),
        }
    }

    #[tokio::test]
    async fn student_table_assigns_identity_keys() -> anyhow::Result<()> {
        let db = db::connect_in_memory().await?;
        migration::Migrator::up(&db, None).await?;

        let a = row("alice").insert(&db).await?;
        let b = row("bob").insert(&db).await?;
        assert_eq!(a.id, 1);
        assert_ne!(a.id, b.id);

        let found = student::Entity::find_by_id(a.id).one(&db).await?.expect("alice row");
        assert_eq!(found, a);
        assert_eq!(found.mail, None);

        let all = student::Entity::find().order_by_asc(student::Column::Id).all(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].username.as_deref(), Some("bob"));
        Ok(())
    }

    #[tokio::test]
    async fn migration_is_reversible() -> anyhow::Result<()> {
        let db = db::connect_in_memory().await?;
        migration::Migrator::up(&db, None).await?;
        migration::Migrator::down(&db, None).await?;
        assert!(student::Entity::find().all(&db).await.is_err());
        Ok(())
    }
}
