use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
mod breakpoints;
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use events::WindowEvent;
use services::{create_measurement_source, ResizeWatcher, ViewportRegistry};

#[derive(Parser, Debug)]
#[command(name = "viewport-class")]
#[command(version)]
#[command(about = "Поддерживает CSS-класс вьюпорта у элементов при изменении ширины окна")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "viewport.toml")]
    config: String,

    /// Режим сухого запуска (размер окна эмулируется)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Один замер: вывести текущий вьюпорт каждого элемента и выйти
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let log_level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(log_level, &config.logging.format)?;

    info!("Запуск viewport-class v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - размер окна эмулируется");
    }

    let registry = Arc::new(ViewportRegistry::from_config(&config)?);
    let source = create_measurement_source(&config, args.dry_run).await?;

    if args.once {
        let measurement = source.measure().await?;
        registry.dispatch(&WindowEvent::loaded(measurement))?;
        for name in registry.element_names() {
            if let Some(data) = registry.data(&name) {
                println!("{}: {}", name, data);
            }
        }
        return Ok(());
    }

    let watcher = ResizeWatcher::new(config.clone(), source, registry.clone());

    info!("Все компоненты инициализированы");

    let watcher_handle = tokio::spawn(watcher.run());

    info!("Все сервисы запущены");

    let outcome = wait_for_shutdown(watcher_handle, signal::ctrl_c()).await;

    info!("Завершение работы...");

    for name in registry.element_names() {
        match registry.classes(&name) {
            Some(classes) => info!("Элемент '{}': итоговые классы {:?}", name, classes),
            None => warn!("Элемент '{}' не найден в реестре", name),
        }
    }

    outcome?;
    info!("viewport-class завершил работу");
    Ok(())
}

/// Ждёт сигнала завершения или остановки наблюдателя. Ошибка наблюдателя
/// возвращается вызывающему, чтобы процесс завершился с ненулевым кодом.
async fn wait_for_shutdown<S>(mut watcher: JoinHandle<error::Result<()>>, shutdown: S) -> Result<()>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        result = shutdown => {
            match result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
            watcher.abort();
            Ok(())
        }
        joined = &mut watcher => match joined {
            Ok(Ok(())) => {
                warn!("ResizeWatcher остановился");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Ошибка в ResizeWatcher: {}", e);
                Err(e.into())
            }
            Err(e) => {
                error!("Задача ResizeWatcher аварийно завершилась: {}", e);
                Err(e.into())
            }
        }
    }
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }

    Ok(())
}
