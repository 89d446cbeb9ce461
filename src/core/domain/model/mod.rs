pub mod action_outcome;
pub mod computer_system;
pub mod redfish_target;
pub mod system_collection;
