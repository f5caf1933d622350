use thiserror::Error;
use twig_host::HostError;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid descriptor: {tag:?} is not a valid tag name")]
    InvalidDescriptor { tag: String },

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Component state error: {0}")]
    ComponentState(#[from] ComponentStateError),
}

impl RenderError {
    pub fn invalid_descriptor(tag: impl Into<String>) -> Self {
        Self::InvalidDescriptor { tag: tag.into() }
    }
}

/// Misuse of a component's lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentStateError {
    #[error("Component '{component}' is not mounted; set_state needs a rendered range")]
    NotMounted { component: String },

    #[error("Component '{component}' updated its own state while rendering")]
    Reentrant { component: String },

    #[error("Prop '{name}' cannot be set after the component has mounted")]
    PropsFrozen { name: String },

    #[error("Prop '{name}' is already set")]
    DuplicateProp { name: String },
}
