//! Deployment artefacts and the provisioning stages that consume the settings

pub mod manifest;
pub mod stages;
pub mod stemcell;

pub use manifest::{deployment_name, MicroBoshManifest};
pub use stages::{deploy_micro_bosh, prepare_inception_vm, run_stage, write_manifest};
pub use stemcell::{resolve_stemcell, BoshCliImageLookup, ImageLookup};
