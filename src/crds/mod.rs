//! The custom resource kinds that are exposed by this provider. Each kind is registered as both
//! a data source and a manifest.
pub mod pod_template;
#[macro_use]
pub mod kubedl;

pub mod app_wrapper;
pub mod py_torch_job;
pub mod scheduling_spec;
pub mod tf_job;
pub mod xgboost_job;

pub use self::app_wrapper::AppWrapper;
pub use self::py_torch_job::PyTorchJob;
pub use self::scheduling_spec::SchedulingSpec;
pub use self::tf_job::TFJob;
pub use self::xgboost_job::XGBoostJob;

use crate::datasource::{DataSourceFactory, KindDataSource, KindManifest};
use crate::resource::CustomResourceKind;

/// Returns the factories for all data sources and manifests, in a stable order
pub fn data_sources() -> Vec<DataSourceFactory> {
    let mut factories = Vec::new();
    register::<AppWrapper>(&mut factories);
    register::<SchedulingSpec>(&mut factories);
    register::<PyTorchJob>(&mut factories);
    register::<TFJob>(&mut factories);
    register::<XGBoostJob>(&mut factories);
    factories
}

fn register<K: CustomResourceKind>(factories: &mut Vec<DataSourceFactory>) {
    factories.push(KindDataSource::<K>::boxed);
    factories.push(KindManifest::<K>::boxed);
}
