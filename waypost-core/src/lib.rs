pub mod cluster;
pub mod config;
pub mod data;
pub mod duration;
pub mod error;
pub mod layout;
pub mod model;
pub mod order;
pub mod report;
pub mod response;
pub mod timeline;
pub mod zones;

pub use cluster::{ClusterMarker, ClusterSummary, Linkage, Pin, cluster_points, cluster_points_with};
pub use error::{Result, WaypostError};
pub use layout::{LayoutOptions, RouteLayout, layout_route};
pub use model::{MapZone, RouteEdge, RouteNode, RoutePlan};
pub use order::order_nodes;
pub use timeline::{Timeline, TimelineOptions, compute_timeline};

pub fn print_banner() {
    let banner = r#"
 ██╗    ██╗ █████╗ ██╗   ██╗██████╗  ██████╗ ███████╗████████╗
 ██║    ██║██╔══██╗╚██╗ ██╔╝██╔══██╗██╔═══██╗██╔════╝╚══██╔══╝
 ██║ █╗ ██║███████║ ╚████╔╝ ██████╔╝██║   ██║███████╗   ██║
 ██║███╗██║██╔══██║  ╚██╔╝  ██╔═══╝ ██║   ██║╚════██║   ██║
 ╚███╔███╔╝██║  ██║   ██║   ██║     ╚██████╔╝███████║   ██║
  ╚══╝╚══╝ ╚═╝  ╚═╝   ╚═╝   ╚═╝      ╚═════╝ ╚══════╝   ╚═╝
         route timelines and hazard maps for AI travel plans
"#;
    println!("{}", banner);
}
