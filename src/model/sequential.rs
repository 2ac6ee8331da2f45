use crate::error::FerrogradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// A container that chains modules: the output of each becomes the input of
/// the next.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<(String, Box<dyn Module>)>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends a named module to the end of the chain.
    pub fn add_module(&mut self, name: impl Into<String>, module: Box<dyn Module>) {
        self.modules.push((name.into(), module));
    }

    /// Appends a module named by its position.
    pub fn push(&mut self, module: Box<dyn Module>) {
        let name = self.modules.len().to_string();
        self.modules.push((name, module));
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        let mut current = input.clone();
        for (name, module) in &self.modules {
            current = module.forward(&current).map_err(|e| {
                log::debug!("Sequential forward failed at module '{}': {}", name, e);
                e
            })?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.modules
            .iter()
            .flat_map(|(_, module)| module.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.modules
            .iter()
            .flat_map(|(name, module)| {
                module
                    .named_parameters()
                    .into_iter()
                    .map(move |(pname, p)| (format!("{}.{}", name, pname), p))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
