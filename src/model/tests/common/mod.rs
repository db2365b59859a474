// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Model definitions shared by the integration tests.

use oci_model::{
    Discriminator, EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder, Registry,
    RegistryError,
};

pub static LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "LocalPeeringGateway.LifecycleState",
    &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
);

pub static PEERING_STATUS: EnumDescriptor = EnumDescriptor::new(
    "LocalPeeringGateway.PeeringStatus",
    &["INVALID", "NEW", "PEERED", "PENDING", "REVOKED"],
);

pub static VOLUME_LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "VolumeAttachment.LifecycleState",
    &["ATTACHING", "ATTACHED", "DETACHING", "DETACHED"],
);

pub static USER_TYPES: EnumDescriptor = EnumDescriptor::new(
    "UserAssessmentFilter.UserTypes",
    &["ADMIN_PRIVILEGED", "APPLICATION", "PRIVILEGED", "SCHEMA", "NON_PRIVILEGED"],
);

pub fn registry() -> Result<Registry, RegistryError> {
    Registry::builder()
        .register(
            ModelBuilder::new("LocalPeeringGateway")
                .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
                .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
                .field(FieldDescriptor::new("id", "id", FieldType::STRING))
                .field(
                    FieldDescriptor::new("is_cross_tenancy_peering", "isCrossTenancyPeering", FieldType::BOOLEAN),
                )
                .field(
                    FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                        .with_enum(&LIFECYCLE_STATE),
                )
                .field(
                    FieldDescriptor::new("peering_status", "peeringStatus", FieldType::STRING)
                        .with_enum(&PEERING_STATUS),
                )
                .field(FieldDescriptor::new(
                    "freeform_tags",
                    "freeformTags",
                    FieldType::map(FieldType::STRING),
                ))
                .field(FieldDescriptor::new(
                    "time_created",
                    "timeCreated",
                    FieldType::DATE_TIME,
                )),
        )
        .register(
            ModelBuilder::new("VolumeAttachment")
                .field(FieldDescriptor::new("attachment_type", "attachmentType", FieldType::STRING))
                .field(FieldDescriptor::new("id", "id", FieldType::STRING))
                .field(FieldDescriptor::new("instance_id", "instanceId", FieldType::STRING))
                .field(
                    FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                        .with_enum(&VOLUME_LIFECYCLE_STATE),
                )
                .discriminator(
                    Discriminator::new("attachmentType")
                        .map("iscsi", "IScsiVolumeAttachment")
                        .map("paravirtualized", "ParavirtualizedVolumeAttachment"),
                ),
        )
        .register(
            ModelBuilder::new("IScsiVolumeAttachment")
                .extends("VolumeAttachment")
                .tag("iscsi")
                .field(FieldDescriptor::new("ipv4", "ipv4", FieldType::STRING))
                .field(FieldDescriptor::new("iqn", "iqn", FieldType::STRING))
                .field(FieldDescriptor::new("port", "port", FieldType::INTEGER)),
        )
        .register(
            ModelBuilder::new("ParavirtualizedVolumeAttachment")
                .extends("VolumeAttachment")
                .tag("paravirtualized")
                .field(FieldDescriptor::new(
                    "is_pv_encryption_in_transit_enabled",
                    "isPvEncryptionInTransitEnabled",
                    FieldType::BOOLEAN,
                )),
        )
        .register(
            ModelBuilder::new("AttachmentList")
                .field(FieldDescriptor::new(
                    "items",
                    "items",
                    FieldType::array(FieldType::object("VolumeAttachment")),
                )),
        )
        .register(
            ModelBuilder::new("AttachmentIndex")
                .field(FieldDescriptor::new(
                    "attachments_by_name",
                    "attachmentsByName",
                    FieldType::map(FieldType::object("VolumeAttachment")),
                )),
        )
        .register(
            ModelBuilder::new("UserAssessmentFilter")
                .field(
                    FieldDescriptor::new("user_types", "userTypes", FieldType::array(FieldType::STRING))
                        .with_enum(&USER_TYPES),
                )
                .field(
                    FieldDescriptor::new("is_hidden", "isHidden", FieldType::BOOLEAN)
                        .with_default(true),
                )
                .field(
                    FieldDescriptor::new("folder_name", "folderName", FieldType::STRING)
                        .with_default("*"),
                ),
        )
        .build()
}
