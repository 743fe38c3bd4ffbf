use std::process;

use anyhow::{Result, bail};
use blog_client::{BlogClient, BlogClientError, Category, Post, PostPatch};
use clap::{Parser, Subcommand};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8000";
const SERVER_ENV: &str = "BLOG_HTTP_URL";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI клиент для blog-server")]
struct Cli {
    /// Адрес сервера. По умолчанию берётся из BLOG_HTTP_URL.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Адреса коллекций.
    Endpoints,
    /// Операции с постами.
    Posts {
        #[command(subcommand)]
        action: PostCommand,
    },
    /// Операции с категориями.
    Categories {
        #[command(subcommand)]
        action: CategoryCommand,
    },
}

#[derive(Debug, Subcommand)]
enum PostCommand {
    /// Список постов.
    List,
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        category_id: i64,
    },
    /// Частичное обновление поста: меняются только указанные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        category_id: Option<i64>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Список категорий с постами.
    List,
    /// Получение категории по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание категории.
    Create {
        #[arg(long)]
        title: String,
    },
    /// Переименование категории.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
    },
    /// Удаление категории (только без постов).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let client = BlogClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::Endpoints => {
            let endpoints = client.endpoints().await.map_err(map_client_error)?;
            println!("posts: {}", endpoints.posts);
            println!("categories: {}", endpoints.categories);
        }
        Command::Posts { action } => run_posts(&client, action).await?,
        Command::Categories { action } => run_categories(&client, action).await?,
    }

    Ok(())
}

async fn run_posts(client: &BlogClient, action: PostCommand) -> Result<()> {
    match action {
        PostCommand::List => {
            let list = client.list_posts().await.map_err(map_client_error)?;
            println!("Постов: {}", list.data.len());
            for post in &list.data {
                println!("{}", post_line(post));
            }
        }
        PostCommand::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        PostCommand::Create {
            title,
            body,
            category_id,
        } => {
            let id = client
                .create_post(&title, &body, category_id)
                .await
                .map_err(map_client_error)?;
            println!("Пост создан: {}", created_id(id));
        }
        PostCommand::Update {
            id,
            title,
            body,
            category_id,
        } => {
            let patch = PostPatch {
                title,
                body,
                category_id,
            };
            if patch.is_empty() {
                bail!("укажите хотя бы одно поле: --title, --body или --category-id");
            }
            client
                .update_post(id, &patch)
                .await
                .map_err(map_client_error)?;
            println!("Пост обновлён: id={id}");
        }
        PostCommand::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }
    Ok(())
}

async fn run_categories(client: &BlogClient, action: CategoryCommand) -> Result<()> {
    match action {
        CategoryCommand::List => {
            let list = client.list_categories().await.map_err(map_client_error)?;
            println!("Категорий: {}", list.data.len());
            for category in &list.data {
                print_category(category);
            }
        }
        CategoryCommand::Get { id } => {
            let category = client.get_category(id).await.map_err(map_client_error)?;
            print_category(&category);
        }
        CategoryCommand::Create { title } => {
            let id = client
                .create_category(&title)
                .await
                .map_err(map_client_error)?;
            println!("Категория создана: {}", created_id(id));
        }
        CategoryCommand::Update { id, title } => {
            client
                .update_category(id, &title)
                .await
                .map_err(map_client_error)?;
            println!("Категория обновлена: id={id}");
        }
        CategoryCommand::Delete { id } => {
            client.delete_category(id).await.map_err(map_client_error)?;
            println!("Категория удалена: id={id}");
        }
    }
    Ok(())
}

/// `--server`, затем переменная окружения, затем адрес по умолчанию.
fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn created_id(id: Option<i64>) -> String {
    match id {
        Some(id) => format!("id={id}"),
        None => "id неизвестен (нет заголовка Location)".to_string(),
    }
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::NotFound => "ресурс не найден".to_string(),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Conflict(message) => {
            format!("конфликт: {message} (в категории остались посты?)")
        }
        BlogClientError::Server(message) => format!("ошибка сервера: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn post_line(post: &Post) -> String {
    let category = post
        .category_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("- [{}] {} (category_id={category})", post.id, post.title)
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("body: {}", post.body);
    match post.category_id {
        Some(category_id) => println!("category_id: {category_id}"),
        None => println!("category_id: -"),
    }
    println!("created_at: {}", post.created_at);
}

fn print_category(category: &Category) {
    println!(
        "[{}] {} (created_at={}, постов: {})",
        category.id,
        category.title,
        category.created_at,
        category.posts.len()
    );
    for post in &category.posts {
        println!("  {}", post_line(post));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8000".to_string());
        assert_eq!(s, "https://example.com:8000");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8000".to_string());
        assert_eq!(s, "http://127.0.0.1:8000");
    }

    #[test]
    fn resolve_server_defaults() {
        assert_eq!(resolve_server(None, None), DEFAULT_HTTP_SERVER);
        assert_eq!(
            resolve_server(None, Some("  ".to_string())),
            DEFAULT_HTTP_SERVER
        );
    }

    #[test]
    fn resolve_server_prefers_flag_over_env() {
        let server = resolve_server(
            Some("localhost:9999".to_string()),
            Some("http://env:1".to_string()),
        );
        assert_eq!(server, "http://localhost:9999");
    }

    #[test]
    fn resolve_server_uses_env() {
        let server = resolve_server(None, Some("http://env:1".to_string()));
        assert_eq!(server, "http://env:1");
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "blog-cli",
            "posts",
            "update",
            "--id",
            "3",
            "--title",
            "X",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Posts {
                action:
                    PostCommand::Update {
                        id,
                        title,
                        body,
                        category_id,
                    },
            } => {
                assert_eq!(id, 3);
                assert_eq!(title.as_deref(), Some("X"));
                assert!(body.is_none());
                assert!(category_id.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn category_id_flag_is_kebab_case() {
        let cli = Cli::try_parse_from([
            "blog-cli",
            "--server",
            "localhost:1",
            "posts",
            "create",
            "--title",
            "t",
            "--body",
            "b",
            "--category-id",
            "2",
        ])
        .expect("arguments must parse");

        assert_eq!(cli.server.as_deref(), Some("localhost:1"));
        assert!(matches!(
            cli.command,
            Command::Posts {
                action: PostCommand::Create { category_id: 2, .. }
            }
        ));
    }

    #[test]
    fn server_errors_are_reported_as_such() {
        let err = map_client_error(BlogClientError::Server("Internal Server Error".to_string()));
        assert_eq!(err.to_string(), "ошибка сервера: Internal Server Error");

        let err = map_client_error(BlogClientError::InvalidRequest("Unprocessable Entity".to_string()));
        assert_eq!(err.to_string(), "некорректный запрос: Unprocessable Entity");
    }

    #[test]
    fn created_id_without_location() {
        assert_eq!(created_id(Some(5)), "id=5");
        assert!(created_id(None).contains("Location"));
    }
}
