use indexmap::IndexMap;
use tracing::debug;

use crate::controllers::{
    BarWithErrorBarsController, ChartController, LineWithErrorBarsController,
    PolarAreaWithErrorBarsController, ScatterWithErrorBarsController,
};
use crate::error::{ChartError, ChartResult};

pub type ControllerFactory = fn() -> Box<dyn ChartController>;

/// Chart type entry: the type id used in configs, the element it draws and
/// how to build its controller.
#[derive(Debug, Clone)]
pub struct ControllerRegistration {
    pub id: String,
    pub element_id: String,
    pub factory: ControllerFactory,
}

impl ControllerRegistration {
    /// Registration of `C` under its own ids.
    #[must_use]
    pub fn of<C: ChartController + Default + 'static>() -> Self {
        let factory: ControllerFactory = build::<C>;
        let controller = factory();
        Self {
            id: controller.id().to_owned(),
            element_id: controller.element_id().to_owned(),
            factory,
        }
    }
}

fn build<C: ChartController + Default + 'static>() -> Box<dyn ChartController> {
    Box::new(C::default())
}

/// Insertion-ordered chart type registry.
#[derive(Debug, Clone, Default)]
pub struct ChartTypeRegistry {
    entries: IndexMap<String, ControllerRegistration>,
}

impl ChartTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four error-bar chart types.
    #[must_use]
    pub fn with_error_bar_types() -> Self {
        let mut registry = Self::new();
        for registration in [
            ControllerRegistration::of::<BarWithErrorBarsController>(),
            ControllerRegistration::of::<LineWithErrorBarsController>(),
            ControllerRegistration::of::<ScatterWithErrorBarsController>(),
            ControllerRegistration::of::<PolarAreaWithErrorBarsController>(),
        ] {
            registry
                .entries
                .insert(registration.id.clone(), registration);
        }
        registry
    }

    /// Registers a chart type with unique identifier.
    pub fn register(&mut self, registration: ControllerRegistration) -> ChartResult<()> {
        if registration.id.is_empty() {
            return Err(ChartError::InvalidData(
                "chart type id must not be empty".to_owned(),
            ));
        }
        if self.entries.contains_key(&registration.id) {
            return Err(ChartError::InvalidData(format!(
                "chart type `{}` is already registered",
                registration.id
            )));
        }
        debug!(
            id = %registration.id,
            element = %registration.element_id,
            "chart type registered"
        );
        self.entries
            .insert(registration.id.clone(), registration);
        Ok(())
    }

    /// Unregisters a chart type by id. Returns `true` when removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.entries.shift_remove(id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ControllerRegistration> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Builds the controller registered under `id`.
    pub fn create(&self, id: &str) -> ChartResult<Box<dyn ChartController>> {
        self.entries
            .get(id)
            .map(|registration| (registration.factory)())
            .ok_or_else(|| ChartError::UnknownChartType(id.to_owned()))
    }
}
