//! Spec mapping: translate a provider-neutral resource spec into
//! provider-specific instance/SKU identifiers and region codes.
//!
//! Pure functions over threshold tables. The compute tables pick the smallest
//! current-generation shape that covers the requested vCPU/RAM; a RAM/vCPU
//! ratio above 4 (or an explicit memory-optimized class) routes to the
//! provider's memory-optimized family.

use crate::models::{
    CloudProvider, CostCategory, DatabaseEngine, InstanceClass, ResourceSpec, StorageClass,
};

/// RAM/vCPU ratio above which a workload is treated as memory-optimized
const MEMORY_OPTIMIZED_RATIO: f64 = 4.0;

/// Map a generic compute spec to a provider instance identifier
pub fn compute_instance_for(
    provider: CloudProvider,
    vcpus: u32,
    ram_gb: f64,
    class: InstanceClass,
) -> &'static str {
    let memory_optimized = class == InstanceClass::MemoryOptimized
        || (vcpus > 0 && ram_gb / f64::from(vcpus) > MEMORY_OPTIMIZED_RATIO);

    match provider {
        CloudProvider::Aws => {
            if memory_optimized {
                match vcpus {
                    0..=2 => "r5.large",
                    3..=4 => "r5.xlarge",
                    _ => "r5.2xlarge",
                }
            } else if vcpus <= 2 && ram_gb <= 4.0 {
                "t3.medium"
            } else if vcpus <= 2 && ram_gb <= 8.0 {
                "t3.large"
            } else if vcpus <= 4 && ram_gb <= 8.0 {
                "m5.xlarge"
            } else if vcpus <= 8 && ram_gb <= 16.0 {
                "m5.2xlarge"
            } else if vcpus <= 8 && ram_gb <= 32.0 {
                "m5.4xlarge"
            } else {
                "m5.4xlarge"
            }
        }
        CloudProvider::Azure => {
            if memory_optimized {
                match vcpus {
                    0..=2 => "Standard_E2s_v3",
                    3..=4 => "Standard_E4s_v3",
                    _ => "Standard_E8s_v3",
                }
            } else if vcpus <= 2 && ram_gb <= 4.0 {
                "Standard_B2s"
            } else if vcpus <= 2 && ram_gb <= 8.0 {
                "Standard_B2ms"
            } else if vcpus <= 4 && ram_gb <= 16.0 {
                "Standard_D4s_v3"
            } else if vcpus <= 8 && ram_gb <= 32.0 {
                "Standard_D8s_v3"
            } else {
                "Standard_D8s_v3"
            }
        }
        CloudProvider::Gcp => {
            if memory_optimized {
                match vcpus {
                    0..=2 => "n2-highmem-2",
                    3..=4 => "n2-highmem-4",
                    _ => "n2-highmem-8",
                }
            } else if vcpus <= 2 {
                "n2-standard-2"
            } else if vcpus <= 4 {
                "n2-standard-4"
            } else {
                "n2-standard-8"
            }
        }
        // Flexible shape: sizing is expressed via OCPU/memory counts, not SKUs
        CloudProvider::Oracle => "VM.Standard.E4.Flex",
    }
}

/// Map a database engine to the provider's default managed-database instance
pub fn database_instance_for(provider: CloudProvider, engine: DatabaseEngine) -> &'static str {
    match provider {
        CloudProvider::Aws => "db.t3.medium",
        CloudProvider::Azure => match engine {
            DatabaseEngine::Sqlserver => "S0",
            _ => "GP_Gen5_2",
        },
        CloudProvider::Gcp => "db-n1-standard-1",
        CloudProvider::Oracle => "VM.Standard2.1",
    }
}

/// Map a storage class to the provider's storage SKU identifier
pub fn storage_sku_for(provider: CloudProvider, class: StorageClass) -> &'static str {
    match provider {
        CloudProvider::Aws => match class {
            StorageClass::Ssd => "gp3",
            StorageClass::Hdd => "st1",
            StorageClass::Object => "STANDARD",
            StorageClass::Archive => "GLACIER",
        },
        CloudProvider::Azure => match class {
            StorageClass::Ssd => "Premium_LRS",
            StorageClass::Hdd | StorageClass::Object => "Standard_LRS",
            StorageClass::Archive => "Archive_LRS",
        },
        CloudProvider::Gcp => match class {
            StorageClass::Ssd => "pd-ssd",
            StorageClass::Hdd => "pd-standard",
            StorageClass::Object => "STANDARD",
            StorageClass::Archive => "ARCHIVE",
        },
        CloudProvider::Oracle => match class {
            StorageClass::Ssd | StorageClass::Hdd => "block-volume",
            StorageClass::Object => "object-standard",
            StorageClass::Archive => "object-archive",
        },
    }
}

/// Map the workload (AWS-style) region to the provider's region code.
/// Unknown regions fall back to the provider's default region.
pub fn region_for(provider: CloudProvider, region: &str) -> String {
    match provider {
        CloudProvider::Aws | CloudProvider::Oracle => region.to_string(),
        CloudProvider::Azure => match region {
            "us-east-1" => "eastus",
            "us-west-1" => "westus",
            "us-west-2" => "westus2",
            "eu-west-1" => "westeurope",
            "ap-south-1" => "centralindia",
            "ap-southeast-1" => "southeastasia",
            _ => "eastus",
        }
        .to_string(),
        CloudProvider::Gcp => match region {
            "us-east-1" => "us-east1",
            "us-west-1" => "us-west1",
            "us-west-2" => "us-west2",
            "eu-west-1" => "europe-west1",
            "ap-south-1" => "asia-south1",
            "ap-southeast-1" => "asia-southeast1",
            _ => "us-central1",
        }
        .to_string(),
    }
}

/// Provider-specific identifier for a resource spec, used as the cache key
/// component and the adapter lookup id. Networking has no mappable SKU.
pub fn spec_id(provider: CloudProvider, category: CostCategory, spec: &ResourceSpec) -> Option<String> {
    match (category, spec) {
        (CostCategory::Compute, ResourceSpec::Compute { vcpus, ram_gb, class }) => Some(
            compute_instance_for(provider, *vcpus, *ram_gb, *class).to_string(),
        ),
        (CostCategory::Storage, ResourceSpec::Storage { class }) => {
            Some(storage_sku_for(provider, *class).to_string())
        }
        (CostCategory::Database, ResourceSpec::Database { engine }) => {
            Some(database_instance_for(provider, *engine).to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_standard_tier() {
        assert_eq!(
            compute_instance_for(CloudProvider::Aws, 2, 4.0, InstanceClass::Standard),
            "t3.medium"
        );
        assert_eq!(
            compute_instance_for(CloudProvider::Azure, 2, 4.0, InstanceClass::Standard),
            "Standard_B2s"
        );
        assert_eq!(
            compute_instance_for(CloudProvider::Gcp, 2, 4.0, InstanceClass::Standard),
            "n2-standard-2"
        );
    }

    #[test]
    fn test_medium_standard_tier() {
        assert_eq!(
            compute_instance_for(CloudProvider::Aws, 4, 8.0, InstanceClass::Standard),
            "m5.xlarge"
        );
        assert_eq!(
            compute_instance_for(CloudProvider::Azure, 4, 16.0, InstanceClass::Standard),
            "Standard_D4s_v3"
        );
    }

    #[test]
    fn test_high_ram_ratio_routes_to_memory_family() {
        // 2 vCPU / 16 GB -> ratio 8 > 4
        assert_eq!(
            compute_instance_for(CloudProvider::Aws, 2, 16.0, InstanceClass::Standard),
            "r5.large"
        );
        assert_eq!(
            compute_instance_for(CloudProvider::Gcp, 4, 32.0, InstanceClass::Standard),
            "n2-highmem-4"
        );
    }

    #[test]
    fn test_explicit_memory_optimized_class() {
        assert_eq!(
            compute_instance_for(CloudProvider::Azure, 2, 4.0, InstanceClass::MemoryOptimized),
            "Standard_E2s_v3"
        );
    }

    #[test]
    fn test_oracle_uses_flexible_shape() {
        assert_eq!(
            compute_instance_for(CloudProvider::Oracle, 16, 64.0, InstanceClass::Standard),
            "VM.Standard.E4.Flex"
        );
    }

    #[test]
    fn test_region_mapping() {
        assert_eq!(region_for(CloudProvider::Aws, "us-east-1"), "us-east-1");
        assert_eq!(region_for(CloudProvider::Azure, "us-east-1"), "eastus");
        assert_eq!(region_for(CloudProvider::Gcp, "eu-west-1"), "europe-west1");
    }

    #[test]
    fn test_region_mapping_defaults() {
        assert_eq!(region_for(CloudProvider::Azure, "unknown-region"), "eastus");
        assert_eq!(region_for(CloudProvider::Gcp, "unknown-region"), "us-central1");
    }

    #[test]
    fn test_spec_id_for_networking_is_absent() {
        let spec = ResourceSpec::Storage {
            class: StorageClass::Ssd,
        };
        assert!(spec_id(CloudProvider::Aws, CostCategory::Networking, &spec).is_none());
    }

    #[test]
    fn test_spec_id_for_database() {
        let spec = ResourceSpec::Database {
            engine: DatabaseEngine::Postgres,
        };
        assert_eq!(
            spec_id(CloudProvider::Gcp, CostCategory::Database, &spec).as_deref(),
            Some("db-n1-standard-1")
        );
    }
}
