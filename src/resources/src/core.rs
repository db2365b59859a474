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

//! Core Services: networking, compute, and block volume resources.

use crate::{Error, defined_tags, freeform_tags, request_body};
use bytes::Bytes;
use model::{Discriminator, EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder, ModelInstance};
use request::{ClientConfig, RequestBuilder};

pub const LOCAL_PEERING_GATEWAY: &str = "LocalPeeringGateway";
pub const VCN: &str = "Vcn";
pub const VOLUME_ATTACHMENT: &str = "VolumeAttachment";
pub const ISCSI_VOLUME_ATTACHMENT: &str = "IScsiVolumeAttachment";
pub const PARAVIRTUALIZED_VOLUME_ATTACHMENT: &str = "ParavirtualizedVolumeAttachment";
pub const EMULATED_VOLUME_ATTACHMENT: &str = "EmulatedVolumeAttachment";
pub const ATTACH_VOLUME_DETAILS: &str = "AttachVolumeDetails";
pub const ATTACH_ISCSI_VOLUME_DETAILS: &str = "AttachIScsiVolumeDetails";
pub const ATTACH_PARAVIRTUALIZED_VOLUME_DETAILS: &str = "AttachParavirtualizedVolumeDetails";
pub const ATTACH_EMULATED_VOLUME_DETAILS: &str = "AttachEmulatedVolumeDetails";

pub static LOCAL_PEERING_GATEWAY_LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "LocalPeeringGateway.LifecycleState",
    &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
);

pub static PEERING_STATUS: EnumDescriptor = EnumDescriptor::new(
    "LocalPeeringGateway.PeeringStatus",
    &["INVALID", "NEW", "PEERED", "PENDING", "REVOKED"],
);

pub static VCN_LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "Vcn.LifecycleState",
    &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED", "UPDATING"],
);

pub static VOLUME_ATTACHMENT_LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "VolumeAttachment.LifecycleState",
    &["ATTACHING", "ATTACHED", "DETACHING", "DETACHED"],
);

pub static ISCSI_LOGIN_STATE: EnumDescriptor = EnumDescriptor::new(
    "VolumeAttachment.IscsiLoginState",
    &[
        "UNKNOWN",
        "LOGGING_IN",
        "LOGIN_SUCCEEDED",
        "LOGIN_FAILED",
        "LOGGING_OUT",
        "LOGOUT_SUCCEEDED",
        "LOGOUT_FAILED",
    ],
);

pub static ENCRYPTION_IN_TRANSIT_TYPE: EnumDescriptor = EnumDescriptor::new(
    "EncryptionInTransitType",
    &["NONE", "BM_ENCRYPTION_IN_TRANSIT"],
);

pub(crate) fn models() -> Vec<ModelBuilder> {
    let local_peering_gateway = ModelBuilder::new(LOCAL_PEERING_GATEWAY)
        .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
        .field(defined_tags())
        .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
        .field(freeform_tags())
        .field(FieldDescriptor::new("id", "id", FieldType::STRING))
        .field(FieldDescriptor::new(
            "is_cross_tenancy_peering",
            "isCrossTenancyPeering",
            FieldType::BOOLEAN,
        ))
        .field(
            FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                .with_enum(&LOCAL_PEERING_GATEWAY_LIFECYCLE_STATE),
        )
        .field(FieldDescriptor::new("peer_advertised_cidr", "peerAdvertisedCidr", FieldType::STRING))
        .field(FieldDescriptor::new(
            "peer_advertised_cidr_details",
            "peerAdvertisedCidrDetails",
            FieldType::array(FieldType::STRING),
        ))
        .field(
            FieldDescriptor::new("peering_status", "peeringStatus", FieldType::STRING)
                .with_enum(&PEERING_STATUS),
        )
        .field(FieldDescriptor::new("peering_status_details", "peeringStatusDetails", FieldType::STRING))
        .field(FieldDescriptor::new("route_table_id", "routeTableId", FieldType::STRING))
        .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
        .field(FieldDescriptor::new("vcn_id", "vcnId", FieldType::STRING));

    let vcn = ModelBuilder::new(VCN)
        .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING))
        .field(FieldDescriptor::new("cidr_blocks", "cidrBlocks", FieldType::array(FieldType::STRING)))
        .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
        .field(FieldDescriptor::new("default_dhcp_options_id", "defaultDhcpOptionsId", FieldType::STRING))
        .field(FieldDescriptor::new("default_route_table_id", "defaultRouteTableId", FieldType::STRING))
        .field(FieldDescriptor::new("default_security_list_id", "defaultSecurityListId", FieldType::STRING))
        .field(defined_tags())
        .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
        .field(FieldDescriptor::new("dns_label", "dnsLabel", FieldType::STRING))
        .field(freeform_tags())
        .field(FieldDescriptor::new("id", "id", FieldType::STRING))
        .field(FieldDescriptor::new(
            "ipv6_cidr_blocks",
            "ipv6CidrBlocks",
            FieldType::array(FieldType::STRING),
        ))
        .field(
            FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                .with_enum(&VCN_LIFECYCLE_STATE),
        )
        .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
        .field(FieldDescriptor::new("vcn_domain_name", "vcnDomainName", FieldType::STRING));

    let volume_attachment = ModelBuilder::new(VOLUME_ATTACHMENT)
        .field(FieldDescriptor::new("attachment_type", "attachmentType", FieldType::STRING))
        .field(FieldDescriptor::new("availability_domain", "availabilityDomain", FieldType::STRING))
        .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
        .field(FieldDescriptor::new("device", "device", FieldType::STRING))
        .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
        .field(FieldDescriptor::new("id", "id", FieldType::STRING))
        .field(FieldDescriptor::new("instance_id", "instanceId", FieldType::STRING))
        .field(FieldDescriptor::new("is_read_only", "isReadOnly", FieldType::BOOLEAN))
        .field(FieldDescriptor::new("is_shareable", "isShareable", FieldType::BOOLEAN))
        .field(
            FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                .with_enum(&VOLUME_ATTACHMENT_LIFECYCLE_STATE),
        )
        .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
        .field(FieldDescriptor::new("volume_id", "volumeId", FieldType::STRING))
        .field(FieldDescriptor::new(
            "is_pv_encryption_in_transit_enabled",
            "isPvEncryptionInTransitEnabled",
            FieldType::BOOLEAN,
        ))
        .field(FieldDescriptor::new("is_multipath", "isMultipath", FieldType::BOOLEAN))
        .field(
            FieldDescriptor::new("iscsi_login_state", "iscsiLoginState", FieldType::STRING)
                .with_enum(&ISCSI_LOGIN_STATE),
        )
        .discriminator(
            Discriminator::new("attachmentType")
                .map("iscsi", ISCSI_VOLUME_ATTACHMENT)
                .map("paravirtualized", PARAVIRTUALIZED_VOLUME_ATTACHMENT)
                .map("emulated", EMULATED_VOLUME_ATTACHMENT),
        );

    let iscsi_volume_attachment = ModelBuilder::new(ISCSI_VOLUME_ATTACHMENT)
        .extends(VOLUME_ATTACHMENT)
        .tag("iscsi")
        .field(FieldDescriptor::new("chap_secret", "chapSecret", FieldType::STRING))
        .field(FieldDescriptor::new("chap_username", "chapUsername", FieldType::STRING))
        .field(FieldDescriptor::new("ipv4", "ipv4", FieldType::STRING))
        .field(FieldDescriptor::new("iqn", "iqn", FieldType::STRING))
        .field(FieldDescriptor::new("port", "port", FieldType::INTEGER))
        .field(
            FieldDescriptor::new(
                "encryption_in_transit_type",
                "encryptionInTransitType",
                FieldType::STRING,
            )
            .with_enum(&ENCRYPTION_IN_TRANSIT_TYPE),
        );

    let attach_volume_details = ModelBuilder::new(ATTACH_VOLUME_DETAILS)
        .field(FieldDescriptor::new("device", "device", FieldType::STRING))
        .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
        .field(FieldDescriptor::new("instance_id", "instanceId", FieldType::STRING))
        .field(FieldDescriptor::new("is_read_only", "isReadOnly", FieldType::BOOLEAN))
        .field(FieldDescriptor::new("is_shareable", "isShareable", FieldType::BOOLEAN))
        .field(FieldDescriptor::new("type", "type", FieldType::STRING))
        .field(FieldDescriptor::new("volume_id", "volumeId", FieldType::STRING))
        .discriminator(
            Discriminator::new("type")
                .map("iscsi", ATTACH_ISCSI_VOLUME_DETAILS)
                .map("paravirtualized", ATTACH_PARAVIRTUALIZED_VOLUME_DETAILS)
                .map("emulated", ATTACH_EMULATED_VOLUME_DETAILS),
        );

    let attach_iscsi_volume_details = ModelBuilder::new(ATTACH_ISCSI_VOLUME_DETAILS)
        .extends(ATTACH_VOLUME_DETAILS)
        .tag("iscsi")
        .field(FieldDescriptor::new("use_chap", "useChap", FieldType::BOOLEAN))
        .field(
            FieldDescriptor::new(
                "encryption_in_transit_type",
                "encryptionInTransitType",
                FieldType::STRING,
            )
            .with_enum(&ENCRYPTION_IN_TRANSIT_TYPE),
        )
        .field(FieldDescriptor::new(
            "is_agent_auto_iscsi_login_enabled",
            "isAgentAutoIscsiLoginEnabled",
            FieldType::BOOLEAN,
        ));

    vec![
        local_peering_gateway,
        vcn,
        volume_attachment,
        iscsi_volume_attachment,
        ModelBuilder::new(PARAVIRTUALIZED_VOLUME_ATTACHMENT)
            .extends(VOLUME_ATTACHMENT)
            .tag("paravirtualized"),
        ModelBuilder::new(EMULATED_VOLUME_ATTACHMENT)
            .extends(VOLUME_ATTACHMENT)
            .tag("emulated"),
        attach_volume_details,
        attach_iscsi_volume_details,
        ModelBuilder::new(ATTACH_PARAVIRTUALIZED_VOLUME_DETAILS)
            .extends(ATTACH_VOLUME_DETAILS)
            .tag("paravirtualized")
            .field(FieldDescriptor::new(
                "is_pv_encryption_in_transit_enabled",
                "isPvEncryptionInTransitEnabled",
                FieldType::BOOLEAN,
            )),
        ModelBuilder::new(ATTACH_EMULATED_VOLUME_DETAILS)
            .extends(ATTACH_VOLUME_DETAILS)
            .tag("emulated"),
    ]
}

/// A typed view of a (resolved) volume attachment.
///
/// # Example
/// ```
/// # use oci_resources::{core, decode};
/// # use oci_resources::core::VolumeAttachmentKind;
/// let body = br#"{"attachmentType": "iscsi", "id": "x", "iqn": "iqn.2015-12.com.oracle:a", "port": 3260}"#;
/// let attachment = decode(core::VOLUME_ATTACHMENT, body)?.expect("an object");
/// match VolumeAttachmentKind::from(&attachment) {
///     VolumeAttachmentKind::IScsi(a) => assert!(a.is_set("iqn")),
///     other => panic!("unexpected attachment kind {other:?}"),
/// }
/// # Ok::<(), oci_resources::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VolumeAttachmentKind<'a> {
    IScsi(&'a ModelInstance),
    Paravirtualized(&'a ModelInstance),
    Emulated(&'a ModelInstance),
    /// The base type, used when the service returns an attachment type this
    /// version of the library does not know about.
    Other(&'a ModelInstance),
}

impl<'a> From<&'a ModelInstance> for VolumeAttachmentKind<'a> {
    fn from(value: &'a ModelInstance) -> Self {
        match value.model_name() {
            ISCSI_VOLUME_ATTACHMENT => Self::IScsi(value),
            PARAVIRTUALIZED_VOLUME_ATTACHMENT => Self::Paravirtualized(value),
            EMULATED_VOLUME_ATTACHMENT => Self::Emulated(value),
            _ => Self::Other(value),
        }
    }
}

impl<'a> VolumeAttachmentKind<'a> {
    /// The underlying instance.
    pub fn instance(&self) -> &'a ModelInstance {
        match self {
            Self::IScsi(i) | Self::Paravirtualized(i) | Self::Emulated(i) | Self::Other(i) => i,
        }
    }
}

/// Options for [get_local_peering_gateway].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct GetLocalPeeringGatewayOptions {
    pub opc_request_id: Option<String>,
}

impl GetLocalPeeringGatewayOptions {
    pub fn set_opc_request_id<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_request_id = Some(v.into());
        self
    }
}

/// Gets the specified local peering gateway's information.
///
/// The response body decodes as a [LOCAL_PEERING_GATEWAY].
pub fn get_local_peering_gateway(
    config: &ClientConfig,
    local_peering_gateway_id: &str,
    options: &GetLocalPeeringGatewayOptions,
) -> Result<http::Request<Bytes>, Error> {
    let request = RequestBuilder::new(
        config,
        "GetLocalPeeringGateway",
        http::Method::GET,
        "/localPeeringGateways/{localPeeringGatewayId}",
    )
    .path_param("localPeeringGatewayId", local_peering_gateway_id)
    .header("opc-request-id", options.opc_request_id.as_deref())
    .build()?;
    Ok(request)
}

/// Options for [attach_volume].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct AttachVolumeOptions {
    pub opc_retry_token: Option<String>,
}

impl AttachVolumeOptions {
    pub fn set_opc_retry_token<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_retry_token = Some(v.into());
        self
    }
}

/// Attaches the specified storage volume to the specified instance.
///
/// `attach_volume_details` must be an [ATTACH_VOLUME_DETAILS], or one of its
/// subtypes. The response body decodes as a [VOLUME_ATTACHMENT].
pub fn attach_volume(
    config: &ClientConfig,
    attach_volume_details: &ModelInstance,
    options: &AttachVolumeOptions,
) -> Result<http::Request<Bytes>, Error> {
    let body = request_body("AttachVolume", ATTACH_VOLUME_DETAILS, attach_volume_details)?;
    let request = RequestBuilder::new(
        config,
        "AttachVolume",
        http::Method::POST,
        "/volumeAttachments/",
    )
    .retry_token(options.opc_retry_token.as_deref())
    .body(&body)?
    .build()?;
    Ok(request)
}
