// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Constants for the Aliyun ECS RPC API.
pub const ENDPOINT: &str = "https://ecs.aliyuncs.com/";
pub const API_VERSION: &str = "2014-05-26";
pub const FORMAT_JSON: &str = "JSON";
pub const SIGNATURE_METHOD_HMAC_SHA1: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION_1_0: &str = "1.0";

// Parameter names shared by every RPC call.
pub const PARAM_ACTION: &str = "Action";
pub const PARAM_FORMAT: &str = "Format";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_ACCESS_KEY_ID: &str = "AccessKeyId";
pub const PARAM_SIGNATURE_METHOD: &str = "SignatureMethod";
pub const PARAM_SIGNATURE_VERSION: &str = "SignatureVersion";
pub const PARAM_TIMESTAMP: &str = "Timestamp";
pub const PARAM_SIGNATURE_NONCE: &str = "SignatureNonce";
pub const PARAM_SIGNATURE: &str = "Signature";
pub const PARAM_REGION_ID: &str = "RegionId";

/// Parameters that must be present before a request can be signed.
pub const MANDATORY_PARAMS: [&str; 8] = [
    PARAM_ACTION,
    PARAM_FORMAT,
    PARAM_VERSION,
    PARAM_ACCESS_KEY_ID,
    PARAM_SIGNATURE_METHOD,
    PARAM_SIGNATURE_VERSION,
    PARAM_TIMESTAMP,
    PARAM_SIGNATURE_NONCE,
];
