use crate::plugin::CalculatorPlugin;
use std::collections::HashMap;

/// Owns the registered plugins and resolves identifiers to them.
///
/// Plugins are keyed by `name()`; display titles resolve through a
/// case-insensitive alias table.
pub struct PluginManager {
    plugins: HashMap<String, Box<dyn CalculatorPlugin>>,
    aliases: HashMap<String, String>,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: HashMap::new(), aliases: HashMap::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn CalculatorPlugin>) {
        let name = plugin.name().to_string();
        self.aliases.insert(plugin.title().to_lowercase(), name.clone());
        self.plugins.insert(name, plugin);
    }

    pub fn get(&self, id: &str) -> Option<&dyn CalculatorPlugin> {
        let id = id.trim();
        if let Some(plugin) = self.plugins.get(id) {
            return Some(plugin.as_ref());
        }
        self.aliases
            .get(&id.to_lowercase())
            .and_then(|name| self.plugins.get(name))
            .map(|p| p.as_ref())
    }

    /// `(name, title)` pairs sorted by name
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.plugins.values().map(|p| (p.name(), p.title())).collect();
        entries.sort_unstable();
        entries
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
