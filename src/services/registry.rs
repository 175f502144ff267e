use crate::config::Config;
use crate::error::{Result, ViewportError};
use crate::debug_if_enabled;
use crate::events::{Direction, TransitionEvent, ViewportData, WindowEvent};
use crate::services::sinks::{CallbackSink, CommandHook, ElementClassList, ReadyHook};
use crate::services::viewport_class::ViewportClass;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Все отслеживаемые элементы, по имени элемента
pub struct ViewportRegistry {
    instances: DashMap<String, ViewportClass>,
    elements: DashMap<String, Arc<ElementClassList>>,
}

impl Default for ViewportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self {
            instances: DashMap::new(),
            elements: DashMap::new(),
        }
    }

    /// Собирает экземпляры для всех элементов из конфигурации
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Self::new();

        for element_config in &config.elements {
            let name = element_config.name.clone();
            let table = config.table_for(element_config)?;
            let element = Arc::new(ElementClassList::new(name.clone()));

            let callback: Box<dyn CallbackSink> = match &element_config.on_change {
                Some(command) => Box::new(CommandHook::new(name.clone(), command)?),
                None => {
                    let element_name = name.clone();
                    Box::new(move |max_width: Option<u32>, viewport: &str, direction: Direction| {
                        debug_if_enabled!(
                            "Элемент '{}': {} (max_width: {:?}, resized: {})",
                            element_name,
                            viewport,
                            max_width,
                            direction.resized()
                        );
                    })
                }
            };

            let mut instance = ViewportClass::new(name.clone(), table, element.clone())
                .with_prefix(config.prefix_for(element_config))
                .with_callback(callback);

            if let Some(command) = &element_config.on_ready {
                let hook: Box<dyn ReadyHook> = Box::new(CommandHook::new(name.clone(), command)?);
                instance = instance.with_ready_hook(hook);
            }

            registry.register(instance)?;
            registry.elements.insert(name, element);
        }

        info!("Зарегистрировано элементов: {}", registry.len());
        Ok(registry)
    }

    pub fn register(&self, instance: ViewportClass) -> Result<()> {
        let name = instance.element().to_string();
        if self.instances.contains_key(&name) {
            return Err(ViewportError::Internal(format!("элемент '{}' уже зарегистрирован", name)));
        }

        debug_if_enabled!("Регистрация элемента '{}' с префиксом '{}'", name, instance.css_prefix());
        self.instances.insert(name, instance);
        Ok(())
    }

    /// Передаёт замер каждому экземпляру. Ошибка одного элемента не мешает
    /// остальным, но первая из них возвращается вызывающему.
    pub fn dispatch(&self, event: &WindowEvent) -> Result<Vec<(String, TransitionEvent)>> {
        debug_if_enabled!("Обработка события окна: {}", event);

        let mut transitions = Vec::new();
        let mut first_error = None;

        for mut entry in self.instances.iter_mut() {
            match entry.value_mut().handle(event.measurement) {
                Ok(Some(transition)) => transitions.push((entry.key().clone(), transition)),
                Ok(None) => {}
                Err(e) => {
                    error!("Не удалось обработать замер для '{}': {}", entry.key(), e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(transitions),
        }
    }

    pub fn data(&self, element: &str) -> Option<ViewportData> {
        self.instances.get(element).and_then(|vc| vc.data().cloned())
    }

    pub fn classes(&self, element: &str) -> Option<Vec<String>> {
        self.elements.get(element).map(|el| el.classes())
    }

    pub fn element_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
