mod sdl_schema_tests;
mod sdl_schema_validator_tests;
