mod accessor_naming;
mod accessor_object;
mod accessor_value;
mod cast_checker;
mod projector;
mod selection_plan;

pub use accessor_naming::to_snake_case;
pub use accessor_object::AccessorObject;
pub use accessor_object::MissingFieldError;
pub use accessor_value::AccessorValue;
pub(crate) use cast_checker::check_cast;
pub use cast_checker::CastError;
pub(crate) use projector::Projector;
pub use projector::ProjectionError;
pub(crate) use selection_plan::PlanCache;
