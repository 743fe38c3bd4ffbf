use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Текст поста.
    pub body: String,
    /// Категория, к которой относится пост.
    pub category_id: Option<i64>,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Категория вместе со своими постами (новые первыми).
pub struct Category {
    /// Идентификатор категории.
    pub id: i64,
    /// Название категории.
    pub title: String,
    /// Посты категории.
    pub posts: Vec<Post>,
    /// Дата и время создания категории (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Адреса коллекций, которые возвращает `GET /api/`.
pub struct Endpoints {
    /// Адрес коллекции постов.
    pub posts: String,
    /// Адрес коллекции категорий.
    pub categories: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Обёртка ответа для коллекций.
pub struct Collection<T> {
    /// Адрес коллекции.
    pub uri: String,
    /// Поддерживаемые HTTP-методы.
    pub methods: Vec<String>,
    /// Элементы коллекции.
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Частичное обновление поста: отправляются только заданные поля.
pub struct PostPatch {
    /// Новый заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Новый текст.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Новая категория.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl PostPatch {
    /// `true`, если ни одно поле не задано.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Category, Collection, PostPatch};

    #[test]
    fn patch_omits_unset_fields() {
        let patch = PostPatch {
            title: Some("X".to_string()),
            ..PostPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "title": "X" }));
        assert!(!patch.is_empty());
        assert!(PostPatch::default().is_empty());
    }

    #[test]
    fn category_collection_reads_server_payload() {
        let payload = json!({
            "uri": "localhost:8000/api/categories/",
            "methods": ["GET", "POST", "PATCH", "DELETE"],
            "data": [{
                "id": 1,
                "title": "Tech",
                "created_at": "2024-05-01T10:00:00Z",
                "posts": [{
                    "id": 3,
                    "title": "Hi",
                    "body": "World",
                    "category_id": 1,
                    "created_at": "2024-05-01T10:05:00Z"
                }]
            }]
        });

        let collection: Collection<Category> = serde_json::from_value(payload).unwrap();
        assert_eq!(collection.methods.len(), 4);
        assert_eq!(collection.data[0].title, "Tech");
        assert_eq!(collection.data[0].posts[0].id, 3);
        assert_eq!(collection.data[0].posts[0].category_id, Some(1));
    }
}
