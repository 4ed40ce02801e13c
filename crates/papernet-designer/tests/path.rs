#[path = "path/rounded.rs"]
mod rounded;
#[path = "path/transform.rs"]
mod transform;
#[path = "path/wire.rs"]
mod wire;
