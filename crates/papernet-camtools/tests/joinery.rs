#[path = "joinery/dash.rs"]
mod dash;
#[path = "joinery/interval.rs"]
mod interval;
#[path = "joinery/net.rs"]
mod net;
#[path = "joinery/tabs.rs"]
mod tabs;
