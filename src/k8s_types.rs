use std::fmt::{self, Display};
use std::hash::{self, Hash};

/// A basic description of a Kubernetes resource, with just enough information to address it on
/// the api server. We use `&'static str` for all of these so that it's easy to pass references
/// around without copying. Every custom resource kind exposed by this provider has a constant
/// declared in this module, for example:
///
/// ```no_run
/// use crdprovider::k8s_types::K8sType;
///
/// #[allow(non_upper_case_globals)]
/// pub const MyCrd: &K8sType = &K8sType {
///     api_version: "example.com/v1",
///     kind: "MyCrd",
///     plural_kind: "mycrds"
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct K8sType {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub plural_kind: &'static str,
}

impl Hash for K8sType {
    fn hash<H: hash::Hasher>(&self, hasher: &mut H) {
        self.api_version.hash(hasher);
        self.kind.hash(hasher);
    }
}

impl K8sType {
    pub fn as_group_and_version(&self) -> (&str, &str) {
        match self.api_version.find('/') {
            Some(slash_idx) => (
                &self.api_version[..slash_idx],
                &self.api_version[(slash_idx + 1)..],
            ),
            None => ("", self.api_version),
        }
    }

    pub fn group(&self) -> &str {
        self.as_group_and_version().0
    }

    pub fn version(&self) -> &str {
        self.as_group_and_version().1
    }
}

impl Display for K8sType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.plural_kind)
    }
}

macro_rules! k8s_type {
    ($ref_name:ident, $api_version:expr, $kind:expr, $plural_kind:expr) => {
        #[allow(non_upper_case_globals)]
        pub const $ref_name: &crate::k8s_types::K8sType = &crate::k8s_types::K8sType {
            api_version: $api_version,
            kind: $kind,
            plural_kind: $plural_kind,
        };
    };
}

macro_rules! def_types {
    (@nogroupmod, $group:expr, [
        $( $version:ident => [
            $( $kind:ident ~ $plural_kind:ident ),*
        ]),*
    ]) => {
        $(
            pub mod $version {
                $(
                    k8s_type!($kind, concat!($group, "/", stringify!($version)), stringify!($kind), stringify!($plural_kind));
                )*
            }
        )*
    };
}

pub mod workload_codeflare_dev {
    def_types! {
        @nogroupmod, "workload.codeflare.dev", [
            v1beta1 => [
                AppWrapper ~ appwrappers,
                SchedulingSpec ~ schedulingspecs
            ]
        ]
    }
}

pub mod training_kubedl_io {
    def_types! {
        @nogroupmod, "training.kubedl.io", [
            v1alpha1 => [
                TFJob ~ tfjobs,
                PyTorchJob ~ pytorchjobs,
                XGBoostJob ~ xgboostjobs
            ]
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn k8s_type_returns_group_and_api_version_when_both_are_present() {
        let subject = training_kubedl_io::v1alpha1::TFJob;
        assert_eq!("training.kubedl.io", subject.group());
        assert_eq!("v1alpha1", subject.version());
        assert_eq!("tfjobs", subject.plural_kind);
    }

    #[test]
    fn k8s_type_returns_empty_str_for_group_when_no_group_is_present() {
        let subject = K8sType {
            api_version: "v1",
            kind: "Pod",
            plural_kind: "pods",
        };
        assert_eq!("", subject.group());
        assert_eq!("v1", subject.version());
    }

    #[test]
    fn k8s_type_is_displayed_as_api_version_and_plural() {
        let subject = workload_codeflare_dev::v1beta1::AppWrapper;
        assert_eq!(
            "workload.codeflare.dev/v1beta1/appwrappers",
            subject.to_string()
        );
    }
}
