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

// Form fields checked by the POST policy.
pub const BUCKET: &str = "bucket";
pub const ACL: &str = "acl";
pub const KEY: &str = "key";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const SUCCESS_ACTION_STATUS: &str = "success_action_status";
pub const POLICY: &str = "policy";
pub const X_REQUESTED_WITH: &str = "x-requested-with";
pub const X_AMZ_ALGORITHM: &str = "x-amz-algorithm";
pub const X_AMZ_CREDENTIAL: &str = "x-amz-credential";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_SIGNATURE: &str = "x-amz-signature";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

// Fixed values embedded in every policy.
pub const ALGORITHM_AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
pub const STATUS_CREATED: &str = "201";
pub const REQUESTED_WITH_XHR: &str = "xhr";

// Scope string literals.
pub const SERVICE_S3: &str = "s3";
pub const AWS4_REQUEST: &str = "aws4_request";
