use boot::runtime::Shared;
use boot::{Func, Reflect};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Reflect)]
struct DatabaseConfig {
    url: String,
    pool_size: u32,
}

#[derive(Debug, Clone, Reflect)]
struct HttpConfig {
    bind: String,
    port: u16,
}

#[derive(Debug, Clone, Reflect)]
struct Infra {
    database: DatabaseConfig,
    http: Shared<HttpConfig>,
}

/// Everything the injector knows about.
#[derive(Debug, Clone, Reflect)]
struct AppContainer {
    name: String,
    infra: Infra,
}

fn main() -> Result<(), boot::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let container = AppContainer {
        name: "demo".into(),
        infra: Infra {
            database: DatabaseConfig {
                url: "postgres://localhost/demo".into(),
                pool_size: 8,
            },
            http: Shared::new(HttpConfig {
                bind: "127.0.0.1".into(),
                port: 8080,
            }),
        },
    };

    // The constructor only knows about `DatabaseConfig`.
    let new_repository = Func::new(|config: DatabaseConfig, label: String| {
        format!("{label}: {} ({} connections)", config.url, config.pool_size)
    });

    tracing::info!("Wiring constructors for '{}'", container.name);

    let adapter = boot::boot::<AppContainer, DatabaseConfig>(new_repository)?;
    tracing::info!("Repository adapter: {}", adapter.signature());

    let repository: String = adapter.invoke((container.clone(), String::from("repo")))?;
    println!("{repository}");

    // Pointer-aware: the HTTP config lives behind `Shared` inside the container.
    let new_server = Func::new(|http: Shared<HttpConfig>| {
        format!("listening on {}:{}", http.bind, http.port)
    });

    let adapter = boot::boot_pointer::<AppContainer, HttpConfig>(new_server)?;
    tracing::info!("Server adapter: {}", adapter.signature());

    let server: String = adapter.invoke((Shared::new(container),))?;
    println!("{server}");

    Ok(())
}
