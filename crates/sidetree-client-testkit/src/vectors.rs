//! Golden test vectors for long-form DIDs.
//!
//! Each vector pins the suffix and long-form identifier produced from a
//! given suffix data and delta. Any change in canonicalization, hashing or
//! payload encoding breaks them.

use sidetree_client_core::{CreateOperation, Delta, SuffixData};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub description: &'static str,
    /// DID method used to render the identifier.
    pub method: &'static str,
    /// Suffix data as JSON, in arbitrary key order.
    pub suffix_data: &'static str,
    /// Delta as JSON, in arbitrary key order.
    pub delta: &'static str,
    /// Expected DID suffix.
    pub expected_suffix: &'static str,
    /// Expected long-form DID.
    pub expected_long_form: &'static str,
}

/// The long-form DID used by the ION registration flow.
pub const ION_LONG_FORM_DID: &str = "did:ion:EiAKkYIJO8KmruJVa0YPXZd9JsapoSDzm0jqSz8XLL88xA:eyJkZWx0YSI6eyJwYXRjaGVzIjpbeyJhY3Rpb24iOiJyZXBsYWNlIiwiZG9jdW1lbnQiOnsicHVibGljS2V5cyI6W3siaWQiOiJrZXktMSIsInB1YmxpY0tleUp3ayI6eyJjcnYiOiJzZWNwMjU2azEiLCJrdHkiOiJFQyIsIngiOiJmZ1ZKWWRQMkdhUnptU3ZpT0FVOHBTdk9uTlZPQk1LQWViWGY1aU5WRlNNIiwieSI6InFZeldLc3VULS1qT01mSmtSWGVDOUp3dkYxVWsxZ2JDZEFQMTlHbDQ2WjQifSwicHVycG9zZXMiOlsiYXV0aGVudGljYXRpb24iXSwidHlwZSI6Ikpzb25XZWJLZXkyMDIwIn1dLCJzZXJ2aWNlcyI6W3siaWQiOiJ6aW9uX2R3biIsInNlcnZpY2VFbmRwb2ludCI6eyJub2RlcyI6WyJodHRwczovL2R3bi56aW9uLmZ5aSJdfSwidHlwZSI6IkRlY2VudHJhbGl6ZWRXZWJOb2RlIn1dfX1dLCJ1cGRhdGVDb21taXRtZW50IjoiRWlEMXVzaWVGMWVmSGRtT1oydERGQmhDb0g2emFfN0ZlbS1Uc3hmWGg4QVRyZyJ9LCJzdWZmaXhEYXRhIjp7ImRlbHRhSGFzaCI6IkVpQXRuMWNidGFfVXRWS3dpcHBNQWJXQUFOOFUxZFh2a1VZS2dPTk9FMmNWcXciLCJyZWNvdmVyeUNvbW1pdG1lbnQiOiJFaUFZdWZrWnRuRE1PdXk4YTRpMDJBdEw0VHI1eDJzV1F0aXc1TGxvd1diOFNnIn19";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimal create",
            description: "Opaque commitments, no patches",
            method: "ion",
            suffix_data: r#"{"deltaHash":"h1","recoveryCommitment":"c1"}"#,
            delta: r#"{"patches":[],"updateCommitment":"u1"}"#,
            expected_suffix: "EiBjPm7sS3hvrE7FrY9apVdF6U8CP1z8NroLVhdc6NnB_A",
            expected_long_form: "did:ion:EiBjPm7sS3hvrE7FrY9apVdF6U8CP1z8NroLVhdc6NnB_A:eyJkZWx0YSI6eyJwYXRjaGVzIjpbXSwidXBkYXRlQ29tbWl0bWVudCI6InUxIn0sInN1ZmZpeERhdGEiOnsiZGVsdGFIYXNoIjoiaDEiLCJyZWNvdmVyeUNvbW1pdG1lbnQiOiJjMSJ9fQ",
        },
        GoldenVector {
            name: "ion registration",
            description: "A real ION long-form DID with a secp256k1 key and a DWN service",
            method: "ion",
            suffix_data: r#"{"deltaHash":"EiAtn1cbta_UtVKwippMAbWAAN8U1dXvkUYKgONOE2cVqw","recoveryCommitment":"EiAYufkZtnDMOuy8a4i02AtL4Tr5x2sWQtiw5LlowWb8Sg"}"#,
            delta: r#"{"patches":[{"action":"replace","document":{"publicKeys":[{"id":"key-1","publicKeyJwk":{"crv":"secp256k1","kty":"EC","x":"fgVJYdP2GaRzmSviOAU8pSvOnNVOBMKAebXf5iNVFSM","y":"qYzWKsuT--jOMfJkRXeC9JwvF1Uk1gbCdAP19Gl46Z4"},"purposes":["authentication"],"type":"JsonWebKey2020"}],"services":[{"id":"zion_dwn","serviceEndpoint":{"nodes":["https://dwn.zion.fyi"]},"type":"DecentralizedWebNode"}]}}],"updateCommitment":"EiD1usieF1efHdmOZ2tDFBhCoH6za_7Fem-TsxfXh8ATrg"}"#,
            expected_suffix: "EiAKkYIJO8KmruJVa0YPXZd9JsapoSDzm0jqSz8XLL88xA",
            expected_long_form: "did:ion:EiAKkYIJO8KmruJVa0YPXZd9JsapoSDzm0jqSz8XLL88xA:eyJkZWx0YSI6eyJwYXRjaGVzIjpbeyJhY3Rpb24iOiJyZXBsYWNlIiwiZG9jdW1lbnQiOnsicHVibGljS2V5cyI6W3siaWQiOiJrZXktMSIsInB1YmxpY0tleUp3ayI6eyJjcnYiOiJzZWNwMjU2azEiLCJrdHkiOiJFQyIsIngiOiJmZ1ZKWWRQMkdhUnptU3ZpT0FVOHBTdk9uTlZPQk1LQWViWGY1aU5WRlNNIiwieSI6InFZeldLc3VULS1qT01mSmtSWGVDOUp3dkYxVWsxZ2JDZEFQMTlHbDQ2WjQifSwicHVycG9zZXMiOlsiYXV0aGVudGljYXRpb24iXSwidHlwZSI6Ikpzb25XZWJLZXkyMDIwIn1dLCJzZXJ2aWNlcyI6W3siaWQiOiJ6aW9uX2R3biIsInNlcnZpY2VFbmRwb2ludCI6eyJub2RlcyI6WyJodHRwczovL2R3bi56aW9uLmZ5aSJdfSwidHlwZSI6IkRlY2VudHJhbGl6ZWRXZWJOb2RlIn1dfX1dLCJ1cGRhdGVDb21taXRtZW50IjoiRWlEMXVzaWVGMWVmSGRtT1oydERGQmhDb0g2emFfN0ZlbS1Uc3hmWGg4QVRyZyJ9LCJzdWZmaXhEYXRhIjp7ImRlbHRhSGFzaCI6IkVpQXRuMWNidGFfVXRWS3dpcHBNQWJXQUFOOFUxZFh2a1VZS2dPTk9FMmNWcXciLCJyZWNvdmVyeUNvbW1pdG1lbnQiOiJFaUFZdWZrWnRuRE1PdXk4YTRpMDJBdEw0VHI1eDJzV1F0aXc1TGxvd1diOFNnIn19",
        },
        GoldenVector {
            name: "optional fields",
            description: "type and anchorOrigin present, non-ASCII patch content",
            method: "elem",
            suffix_data: r#"{"type":"sidetree","recoveryCommitment":"EiRecovery","deltaHash":"EiCFhTNqdTheL3UwW4TfB_RLyw9TxMQ6XFPLWfZJGgX7ng","anchorOrigin":"https://anchor.example"}"#,
            delta: r#"{"updateCommitment":"EiUpdate","patches":[{"action":"add-services","services":[{"id":"café","type":"LinkedDomains","serviceEndpoint":"https://example.com","priority":42}]}]}"#,
            expected_suffix: "EiAwd1I8V5uDm7RF0f1YDToeEzd9f6UAjDMPjSKGr2Suig",
            expected_long_form: "did:elem:EiAwd1I8V5uDm7RF0f1YDToeEzd9f6UAjDMPjSKGr2Suig:eyJkZWx0YSI6eyJwYXRjaGVzIjpbeyJhY3Rpb24iOiJhZGQtc2VydmljZXMiLCJzZXJ2aWNlcyI6W3siaWQiOiJjYWbDqSIsInByaW9yaXR5Ijo0Miwic2VydmljZUVuZHBvaW50IjoiaHR0cHM6Ly9leGFtcGxlLmNvbSIsInR5cGUiOiJMaW5rZWREb21haW5zIn1dfV0sInVwZGF0ZUNvbW1pdG1lbnQiOiJFaVVwZGF0ZSJ9LCJzdWZmaXhEYXRhIjp7ImFuY2hvck9yaWdpbiI6Imh0dHBzOi8vYW5jaG9yLmV4YW1wbGUiLCJkZWx0YUhhc2giOiJFaUNGaFROcWRUaGVMM1V3VzRUZkJfUkx5dzlUeE1RNlhGUExXZlpKR2dYN25nIiwicmVjb3ZlcnlDb21taXRtZW50IjoiRWlSZWNvdmVyeSIsInR5cGUiOiJzaWRldHJlZSJ9fQ",
        },
    ]
}

/// Build the create operation a vector describes.
pub fn create_from_vector(vector: &GoldenVector) -> CreateOperation {
    let suffix_data: SuffixData =
        serde_json::from_str(vector.suffix_data).expect("vector suffix data");
    let delta: Delta = serde_json::from_str(vector.delta).expect("vector delta");
    CreateOperation::new(suffix_data, delta)
}

/// Check every vector, returning the first failure.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let create = create_from_vector(&vector);

        let suffix = create
            .suffix()
            .map_err(|e| format!("{}: {}", vector.name, e))?;
        if suffix != vector.expected_suffix {
            return Err(format!(
                "{}: suffix {} != {}",
                vector.name, suffix, vector.expected_suffix
            ));
        }

        let long_form = create
            .long_form_uri(vector.method)
            .map_err(|e| format!("{}: {}", vector.name, e))?;
        if long_form != vector.expected_long_form {
            return Err(format!("{}: long form differs", vector.name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidetree_client_core::parse_long_form;

    #[test]
    fn test_all_vectors_verify() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_vectors_parse_back() {
        for vector in all_vectors() {
            let create = create_from_vector(&vector);
            let (suffix_data, delta) = parse_long_form(vector.expected_long_form).unwrap();
            assert_eq!(suffix_data, create.suffix_data, "suffix data for {}", vector.name);
            assert_eq!(delta, create.delta, "delta for {}", vector.name);
        }
    }

    #[test]
    fn test_ion_vector_is_the_registration_did() {
        let ion = all_vectors()
            .into_iter()
            .find(|v| v.name == "ion registration")
            .unwrap();
        assert_eq!(ion.expected_long_form, ION_LONG_FORM_DID);
    }
}
