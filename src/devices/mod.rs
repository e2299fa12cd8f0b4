pub mod actuator;
pub mod quadrature;
pub mod stepper;

#[cfg(test)]
pub(crate) mod mock;
